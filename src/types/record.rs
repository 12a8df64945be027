//! Cycle audit records
//!
//! One record per evaluation cycle, with a SHA-256 digest over a canonical
//! byte encoding so stored records can be re-verified later.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::types::Phase;

/// Record layout version
pub const RECORD_VERSION: u16 = 1;

/// Audit record of one evaluation cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Layout version
    pub version: u16,
    /// Token session identifier (16 bytes)
    pub token_id: [u8; 16],
    /// When the cycle ran (Unix timestamp)
    pub timestamp_unix: i64,
    /// MSS the cycle was evaluated at
    pub mss: u8,
    /// Phase before the cycle
    pub phase_before: Phase,
    /// Phase decided by the cycle
    pub phase_after: Phase,
    /// Governance freeze flag at evaluation time
    pub governance_frozen: bool,
    /// Indices of tranches approved for release
    pub approved_tranches: Vec<u32>,
    /// Whether any tranche evaluation recommended a vault freeze
    pub freeze_recommended: bool,
    /// SHA-256 over the canonical encoding
    pub digest: [u8; 32],
}

impl CycleRecord {
    /// Create a record and fill in its digest
    pub fn new(
        token_id: [u8; 16],
        mss: u8,
        phase_before: Phase,
        phase_after: Phase,
        governance_frozen: bool,
        approved_tranches: Vec<u32>,
        freeze_recommended: bool,
    ) -> Self {
        let mut record = Self {
            version: RECORD_VERSION,
            token_id,
            timestamp_unix: chrono::Utc::now().timestamp(),
            mss,
            phase_before,
            phase_after,
            governance_frozen,
            approved_tranches,
            freeze_recommended,
            digest: [0u8; 32],
        };
        record.digest = record.compute_digest();
        record
    }

    /// Canonical encoding, digest field excluded
    ///
    /// Layout: version(2) + token_id(16) + timestamp(8) + mss(1) +
    /// phase_before(1) + phase_after(1) + frozen(1) + freeze_rec(1) +
    /// tranche_count(4) + indices(4 each)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(35 + self.approved_tranches.len() * 4);
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.token_id);
        bytes.extend_from_slice(&self.timestamp_unix.to_be_bytes());
        bytes.push(self.mss);
        bytes.push(self.phase_before.ordinal());
        bytes.push(self.phase_after.ordinal());
        bytes.push(self.governance_frozen as u8);
        bytes.push(self.freeze_recommended as u8);
        bytes.extend_from_slice(&(self.approved_tranches.len() as u32).to_be_bytes());
        for idx in &self.approved_tranches {
            bytes.extend_from_slice(&idx.to_be_bytes());
        }
        bytes
    }

    /// Digest over the canonical encoding
    pub fn compute_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }

    /// Recompute the digest and compare against the stored one
    pub fn verify_digest(&self) -> bool {
        self.compute_digest() == self.digest
    }

    /// Hex rendering for display and API responses
    pub fn digest_hex(&self) -> String {
        self.digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

//! Liquidity vault tranche definitions

use serde::{Deserialize, Serialize};
use crate::types::Phase;

/// A single unlock unit of a liquidity vault
///
/// Immutable once defined; eligibility is evaluated fresh each cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tranche {
    /// Position within the vault
    pub index: u32,
    /// Token amount held by this tranche
    #[serde(default)]
    pub amount: u128,
    /// Minimum MSS required for release
    pub mss_threshold: u8,
    /// Minimum phase required for release
    pub phase_required: Phase,
}

/// A vault definition as loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultDefinition {
    pub tranches: Vec<Tranche>,
}

impl VaultDefinition {
    /// Load a vault definition from disk
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let vault: VaultDefinition = serde_json::from_str(&content)?;
        Ok(vault)
    }
}

//! Decision outputs of the phase and liquidity evaluators

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::types::Phase;

/// Output of one phase evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseDecision {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Phase the token was in when evaluated
    pub current_phase: Phase,
    /// Phase the token should move to
    pub next_phase: Phase,
    /// MSS that drove the decision
    pub mss: u8,
    /// Whether the phases differ
    pub should_transition: bool,
    /// Human-readable audit trail; embeds the decisive values
    pub reason: String,
}

impl PhaseDecision {
    /// Create new decision
    pub fn new(current_phase: Phase, next_phase: Phase, mss: u8, reason: String) -> Self {
        Self {
            timestamp: Utc::now(),
            current_phase,
            next_phase,
            mss,
            should_transition: next_phase != current_phase,
            reason,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.next_phase.color_code();
        let reset = Phase::color_reset();
        let emoji = self.next_phase.emoji();

        format!(
            "{}{} MSS={} | phase={} -> {} | {}{}",
            color, emoji, self.mss, self.current_phase, self.next_phase, self.reason, reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "mss={} | phase={} -> {} | transition={} | reason={}",
            self.mss, self.current_phase, self.next_phase, self.should_transition, self.reason
        )
    }
}

/// Output of one tranche unlock evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockDecision {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// Which tranche of the vault was evaluated
    pub tranche_index: u32,
    /// How many tranches the vault holds
    pub total_tranches: u32,
    /// Release the tranche
    pub should_unlock: bool,
    /// Freeze the whole vault
    pub should_freeze: bool,
    /// Human-readable audit trail; embeds the compared values
    pub reason: String,
}

impl UnlockDecision {
    /// Create new decision
    pub fn new(
        tranche_index: u32,
        total_tranches: u32,
        should_unlock: bool,
        should_freeze: bool,
        reason: String,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            tranche_index,
            total_tranches,
            should_unlock,
            should_freeze,
            reason,
        }
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "tranche={}/{} | unlock={} | freeze={} | reason={}",
            self.tranche_index, self.total_tranches, self.should_unlock, self.should_freeze,
            self.reason
        )
    }
}

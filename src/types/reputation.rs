//! Wallet reputation inputs and scores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed behavior history for a wallet
///
/// Missing fields deserialize to zero/false; negative numeric inputs are
/// coerced to zero by the scorer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletHistory {
    /// Hours the token has been continuously held
    #[serde(default)]
    pub holding_hours: f64,
    /// Count of large-sell events
    #[serde(default)]
    pub dump_count: u32,
    /// Flagged as automated trading
    #[serde(default)]
    pub is_bot_suspect: bool,
    /// Score from the previous recomputation, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_score: Option<u8>,
}

/// Echo of the raw inputs that produced a score, for audit trails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationBreakdown {
    pub holding_hours: f64,
    pub dump_count: u32,
    pub is_bot_suspect: bool,
}

/// Computed reputation for a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationScore {
    /// Wallet identifier
    pub wallet: String,
    /// Trust score, 0-100
    pub score: u8,
    /// score / 100, rounded to 4 decimal places
    pub allocation_weight: f64,
    /// The raw inputs behind the score
    pub breakdown: ReputationBreakdown,
    /// When this was computed
    pub timestamp: DateTime<Utc>,
}

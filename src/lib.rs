//! EvoLaunch decision core
//!
//! Aggregates rolling market metrics into a Market Stability Score (MSS),
//! evolves a token's lifecycle phase, gates liquidity tranche unlocks, and
//! scores wallet reputation for sale allocation.

pub mod core;
pub mod types;

// =============================================================================
// MSS PHASE BANDS
// =============================================================================

/// MSS below this maps to the Protective phase
pub const MSS_BAND_GROWTH: u8 = 40;

/// MSS at or above this maps to the Expansion phase
pub const MSS_BAND_EXPANSION: u8 = 70;

/// MSS at or above this maps to the Governance phase
pub const MSS_BAND_GOVERNANCE: u8 = 90;

/// MSS below this freezes the vault, regardless of tranche thresholds
pub const MSS_HARD_FREEZE: u8 = 30;

/// Volatility risk above this forces an emergency downgrade to Protective
pub const VOLATILITY_RISK_LIMIT: f64 = 0.75;

/// Liquidity stress above this forces an emergency downgrade to Protective
pub const LIQUIDITY_STRESS_LIMIT: f64 = 0.8;

// =============================================================================
// AGGREGATOR WEIGHTS (sum = 1.0)
// =============================================================================

/// Component weights for MSS aggregation
pub const MSS_WEIGHT_LIQUIDITY: f64 = 0.50;
pub const MSS_WEIGHT_CONCENTRATION: f64 = 0.20;
pub const MSS_WEIGHT_FLOW: f64 = 0.20;
pub const MSS_WEIGHT_VOLATILITY: f64 = 0.10;

/// Quote-side pool depth that earns a full liquidity score
pub const LIQUIDITY_DEPTH_TARGET: f64 = 50.0;

// =============================================================================
// REPUTATION
// =============================================================================

/// Neutral starting score for a wallet with no signals
pub const REPUTATION_BASELINE: i32 = 50;

/// Holding-duration brackets (hours, bonus), largest first; first match wins
pub const HOLDING_BRACKETS: [(f64, i32); 4] = [(168.0, 30), (72.0, 20), (24.0, 10), (1.0, 5)];

/// Penalty per large-sell event
pub const DUMP_PENALTY: i32 = 10;

/// Cap on the total dump penalty
pub const DUMP_PENALTY_CAP: i32 = 40;

/// Penalty for bot-suspect wallets
pub const BOT_PENALTY: i32 = 40;

/// Smoothing factor for the newly computed score
pub const BLEND_NEW: f64 = 0.7;

/// Smoothing factor for the previous score
pub const BLEND_PREVIOUS: f64 = 0.3;

// =============================================================================
// RISK DEFAULTS
// =============================================================================

/// Volatility risk assumed when the aggregator has not supplied one
pub const DEFAULT_VOLATILITY_RISK: f64 = 0.3;

/// Liquidity stress assumed when the aggregator has not supplied one
pub const DEFAULT_LIQUIDITY_STRESS: f64 = 0.3;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

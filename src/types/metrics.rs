//! Market metric inputs and the aggregated stability score

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::{
    DEFAULT_LIQUIDITY_STRESS, DEFAULT_VOLATILITY_RISK, LIQUIDITY_STRESS_LIMIT,
    MSS_WEIGHT_CONCENTRATION, MSS_WEIGHT_FLOW, MSS_WEIGHT_LIQUIDITY, MSS_WEIGHT_VOLATILITY,
    VOLATILITY_RISK_LIMIT,
};

/// Raw rolling metrics observed for a trading pair
///
/// Missing fields deserialize to zero; the aggregator coerces out-of-range
/// values instead of rejecting them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketMetrics {
    /// Quote-side pool depth in native units
    #[serde(default)]
    pub liquidity_depth: f64,
    /// Share of supply held by top wallets (0.0-1.0)
    #[serde(default)]
    pub holder_concentration: f64,
    /// Percentage of recent volume that is buys (0-100)
    #[serde(default)]
    pub buy_pressure: f64,
    /// Normalized rolling volatility (0.0-1.0)
    #[serde(default)]
    pub volatility: f64,
}

impl MarketMetrics {
    /// Create zero metrics
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Per-component scores behind an MSS (each 0-100)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StabilityBreakdown {
    /// Pool depth relative to target (weight: 0.50)
    pub liquidity_score: f64,
    /// Top-holder dispersion (weight: 0.20)
    pub concentration_score: f64,
    /// Buy/sell balance (weight: 0.20)
    pub flow_score: f64,
    /// Inverse rolling volatility (weight: 0.10)
    pub volatility_score: f64,
}

impl StabilityBreakdown {
    /// Calculate weighted sum
    pub fn weighted_sum(&self) -> f64 {
        self.liquidity_score * MSS_WEIGHT_LIQUIDITY
            + self.concentration_score * MSS_WEIGHT_CONCENTRATION
            + self.flow_score * MSS_WEIGHT_FLOW
            + self.volatility_score * MSS_WEIGHT_VOLATILITY
    }
}

/// Risk signals derived from the stability breakdown
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskSignals {
    /// Volatility-driven downgrade pressure (0.0-1.0)
    #[serde(default = "default_volatility_risk")]
    pub volatility_risk: f64,
    /// Thin-liquidity downgrade pressure (0.0-1.0)
    #[serde(default = "default_liquidity_stress")]
    pub liquidity_stress: f64,
}

fn default_volatility_risk() -> f64 {
    DEFAULT_VOLATILITY_RISK
}

fn default_liquidity_stress() -> f64 {
    DEFAULT_LIQUIDITY_STRESS
}

impl Default for RiskSignals {
    fn default() -> Self {
        Self {
            volatility_risk: DEFAULT_VOLATILITY_RISK,
            liquidity_stress: DEFAULT_LIQUIDITY_STRESS,
        }
    }
}

impl RiskSignals {
    /// Either signal past its limit forces the Protective phase
    pub fn is_emergency(&self) -> bool {
        self.volatility_risk > VOLATILITY_RISK_LIMIT || self.liquidity_stress > LIQUIDITY_STRESS_LIMIT
    }
}

/// Aggregated stability score with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityScore {
    /// Market Stability Score, clamped to 0-100
    pub mss: u8,
    /// Component scores used to compute the MSS
    pub breakdown: StabilityBreakdown,
    /// Risk signals derived from the components
    pub risk: RiskSignals,
    /// When this was computed
    pub timestamp: DateTime<Utc>,
}

impl StabilityScore {
    /// Create a new score
    pub fn new(mss: u8, breakdown: StabilityBreakdown, risk: RiskSignals) -> Self {
        Self {
            mss,
            breakdown,
            risk,
            timestamp: Utc::now(),
        }
    }
}

//! Market Stability Aggregator
//!
//! Blends rolling market metrics into the 0-100 MSS consumed by the phase
//! and liquidity evaluators, and derives the risk signals that gate
//! emergency downgrades.

use crate::types::{MarketMetrics, RiskSignals, StabilityBreakdown, StabilityScore};
use crate::LIQUIDITY_DEPTH_TARGET;

/// Aggregator for the Market Stability Score
#[derive(Debug, Default)]
pub struct MarketAggregator;

impl MarketAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Aggregate metrics into an MSS with component breakdown and risk signals
    pub fn aggregate(&self, metrics: &MarketMetrics) -> StabilityScore {
        // Coerce out-of-range inputs rather than rejecting them
        let depth = metrics.liquidity_depth.max(0.0);
        let concentration = metrics.holder_concentration.clamp(0.0, 1.0);
        let buy_pressure = metrics.buy_pressure.clamp(0.0, 100.0);
        let volatility = metrics.volatility.clamp(0.0, 1.0);

        // Component scores, each 0-100
        let liquidity_score = (depth / LIQUIDITY_DEPTH_TARGET * 100.0).min(100.0);
        let concentration_score = (100.0 - concentration * 200.0).max(0.0);
        let flow_score = (100.0 - (buy_pressure - 50.0).abs() * 2.0).max(0.0);
        let volatility_score = (1.0 - volatility) * 100.0;

        let breakdown = StabilityBreakdown {
            liquidity_score,
            concentration_score,
            flow_score,
            volatility_score,
        };

        let mss = breakdown.weighted_sum().round().clamp(0.0, 100.0) as u8;

        let risk = RiskSignals {
            volatility_risk: round2(1.0 - volatility_score / 100.0),
            liquidity_stress: round2(1.0 - liquidity_score / 100.0),
        };

        StabilityScore::new(mss, breakdown, risk)
    }

    /// Quick aggregate - just the MSS
    pub fn quick_mss(&self, metrics: &MarketMetrics) -> u8 {
        self.aggregate(metrics).mss
    }
}

/// Round to 2 decimal places
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_metrics() -> MarketMetrics {
        MarketMetrics {
            liquidity_depth: 50.0,
            holder_concentration: 0.10,
            buy_pressure: 50.0,
            volatility: 0.20,
        }
    }

    #[test]
    fn test_healthy_market_scores_high() {
        let agg = MarketAggregator::new();
        let score = agg.aggregate(&healthy_metrics());
        // l=100, c=80, f=100, v=80 -> 50 + 16 + 20 + 8 = 94
        assert_eq!(score.mss, 94);
        assert_eq!(score.breakdown.liquidity_score, 100.0);
        assert_eq!(score.breakdown.concentration_score, 80.0);
    }

    #[test]
    fn test_zero_metrics_scores_low() {
        let agg = MarketAggregator::new();
        let score = agg.aggregate(&MarketMetrics::zero());
        // l=0, c=100, f=0, v=100 -> 0 + 20 + 0 + 10 = 30
        assert_eq!(score.mss, 30);
    }

    #[test]
    fn test_mss_always_in_range() {
        let agg = MarketAggregator::new();
        let extreme = MarketMetrics {
            liquidity_depth: 1.0e9,
            holder_concentration: 0.0,
            buy_pressure: 50.0,
            volatility: 0.0,
        };
        assert_eq!(agg.quick_mss(&extreme), 100);
    }

    #[test]
    fn test_out_of_range_inputs_are_coerced() {
        let agg = MarketAggregator::new();
        let garbage = MarketMetrics {
            liquidity_depth: -10.0,
            holder_concentration: 3.5,
            buy_pressure: 250.0,
            volatility: -1.0,
        };
        let score = agg.aggregate(&garbage);
        assert_eq!(score.breakdown.liquidity_score, 0.0);
        assert_eq!(score.breakdown.concentration_score, 0.0);
        assert_eq!(score.breakdown.flow_score, 0.0);
        assert_eq!(score.breakdown.volatility_score, 100.0);
    }

    #[test]
    fn test_risk_derivation() {
        let agg = MarketAggregator::new();
        let score = agg.aggregate(&healthy_metrics());
        // volatility_score=80 -> risk 0.2; liquidity_score=100 -> stress 0.0
        assert_eq!(score.risk.volatility_risk, 0.2);
        assert_eq!(score.risk.liquidity_stress, 0.0);
        assert!(!score.risk.is_emergency());
    }

    #[test]
    fn test_choppy_market_flags_emergency() {
        let agg = MarketAggregator::new();
        let choppy = MarketMetrics {
            liquidity_depth: 40.0,
            holder_concentration: 0.15,
            buy_pressure: 55.0,
            volatility: 0.90,
        };
        let score = agg.aggregate(&choppy);
        assert!(score.risk.volatility_risk > 0.75);
        assert!(score.risk.is_emergency());
    }

    #[test]
    fn test_determinism() {
        let agg = MarketAggregator::new();
        let metrics = healthy_metrics();
        assert_eq!(agg.quick_mss(&metrics), agg.quick_mss(&metrics));
    }
}

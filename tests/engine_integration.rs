//! Integration tests for the phase engine
//!
//! Tests the full path: metrics -> aggregator -> phase evaluator -> tracker

use evolaunch::core::{phase, MarketAggregator, PhaseTracker};
use evolaunch::types::{MarketMetrics, Phase, RiskSignals};

fn calm() -> RiskSignals {
    RiskSignals::default()
}

/// Test the full path from metrics to an applied phase transition
#[test]
fn test_full_engine_path() {
    let aggregator = MarketAggregator::new();
    let mut tracker = PhaseTracker::new();

    let metrics = MarketMetrics {
        liquidity_depth: 45.0,
        holder_concentration: 0.12,
        buy_pressure: 52.0,
        volatility: 0.25,
    };

    let score = aggregator.aggregate(&metrics);
    assert!(score.mss <= 100);

    let decision = tracker.update(score.mss, &score.risk);
    assert_eq!(decision.current_phase, Phase::Protective);
    assert!(!decision.reason.is_empty());
}

/// Strong market climbs one phase per cycle, never more
#[test]
fn test_stepwise_climb_to_governance() {
    let mut tracker = PhaseTracker::new();

    let decision = tracker.update(95, &calm());
    assert_eq!(decision.next_phase, Phase::Growth);

    let decision = tracker.update(95, &calm());
    assert_eq!(decision.next_phase, Phase::Expansion);

    let decision = tracker.update(95, &calm());
    assert_eq!(decision.next_phase, Phase::Governance);

    // Already at the top: nothing left to advance to
    let decision = tracker.update(95, &calm());
    assert!(!decision.should_transition);
}

/// Growth at a Governance-band MSS clamps to Expansion
#[test]
fn test_upward_clamp_from_growth() {
    let decision = phase::evaluate(Phase::Growth, 95, &calm(), false);
    assert_eq!(decision.next_phase, Phase::Expansion);
    assert!(decision.should_transition);
}

/// Expansion at a Protective-band MSS drops all the way down in one call
#[test]
fn test_downward_jump_from_expansion() {
    let decision = phase::evaluate(Phase::Expansion, 35, &calm(), false);
    assert_eq!(decision.next_phase, Phase::Protective);
    assert!(decision.should_transition);
}

/// Governance freeze pins the phase no matter what the market does
#[test]
fn test_governance_freeze_pins_phase() {
    let mut tracker = PhaseTracker::with_phase(Phase::Growth);
    tracker.set_governance_frozen(true);

    for mss in [0, 35, 95, 100] {
        let decision = tracker.update(mss, &calm());
        assert_eq!(decision.next_phase, Phase::Growth);
        assert!(!decision.should_transition);
    }
}

/// Emergency risk forces Protective from any height
#[test]
fn test_emergency_downgrade_from_governance() {
    let panic = RiskSignals {
        volatility_risk: 0.9,
        liquidity_stress: 0.2,
    };
    let decision = phase::evaluate(Phase::Governance, 95, &panic, false);
    assert_eq!(decision.next_phase, Phase::Protective);
    assert!(decision.should_transition);
}

/// A market that collapses mid-flight drives the tracker back down
#[test]
fn test_recovery_cycle() {
    let mut tracker = PhaseTracker::new();
    tracker.update(75, &calm()); // -> Growth
    tracker.update(75, &calm()); // -> Expansion
    assert_eq!(tracker.phase(), Phase::Expansion);

    tracker.update(20, &calm()); // crash -> Protective
    assert_eq!(tracker.phase(), Phase::Protective);

    let decision = tracker.update(55, &calm()); // recover -> Growth
    assert_eq!(decision.next_phase, Phase::Growth);
}

/// Aggregated risk signals feed the emergency gate end to end
#[test]
fn test_choppy_metrics_force_protective() {
    let aggregator = MarketAggregator::new();
    let mut tracker = PhaseTracker::with_phase(Phase::Expansion);

    let choppy = MarketMetrics {
        liquidity_depth: 48.0,
        holder_concentration: 0.10,
        buy_pressure: 50.0,
        volatility: 0.92,
    };
    let score = aggregator.aggregate(&choppy);
    assert!(score.risk.is_emergency());

    let decision = tracker.update(score.mss, &score.risk);
    assert_eq!(decision.next_phase, Phase::Protective);
}

/// Test JSON output is valid
#[test]
fn test_json_output_valid() {
    let decision = phase::evaluate(Phase::Growth, 62, &calm(), false);

    let json = serde_json::to_string(&decision).unwrap();
    assert!(json.contains("\"current_phase\""));
    assert!(json.contains("\"next_phase\""));
    assert!(json.contains("\"reason\""));
    assert!(json.contains("GROWTH"));

    let _: evolaunch::types::PhaseDecision = serde_json::from_str(&json).unwrap();
}

/// Test parseable output format
#[test]
fn test_parseable_output_format() {
    let decision = phase::evaluate(Phase::Growth, 62, &calm(), false);
    let formatted = decision.to_parseable_string();

    assert!(formatted.contains("mss="));
    assert!(formatted.contains("phase="));
    assert!(formatted.contains("transition="));
    assert!(formatted.contains("reason="));
}

//! Evaluation cycle composition
//!
//! One cycle: aggregate metrics -> decide the phase -> evaluate tranche
//! unlocks against the decided phase -> emit an audit record. Pure over the
//! supplied snapshot; persistence and chain IO stay with callers.

use serde::Serialize;
use crate::core::aggregator::MarketAggregator;
use crate::core::{liquidity, phase};
use crate::types::{
    CycleRecord, MarketMetrics, Phase, PhaseDecision, StabilityScore, Tranche, UnlockDecision,
};

/// Consistent snapshot of everything one cycle reads
#[derive(Debug, Clone)]
pub struct CycleInput {
    /// Token session identifier
    pub token_id: [u8; 16],
    /// Rolling market metrics for the token's pair
    pub metrics: MarketMetrics,
    /// Phase the token is currently in
    pub current_phase: Phase,
    /// Externally asserted governance freeze
    pub governance_frozen: bool,
    /// Vault tranches to check
    pub tranches: Vec<Tranche>,
}

/// Everything one cycle produced
#[derive(Debug, Clone, Serialize)]
pub struct CycleOutcome {
    /// Aggregated stability score with breakdown and risk signals
    pub stability: StabilityScore,
    /// Phase decision for this cycle
    pub phase: PhaseDecision,
    /// One fresh decision per tranche
    pub unlocks: Vec<UnlockDecision>,
    /// Digest-carrying audit record
    pub record: CycleRecord,
}

/// Run one evaluation cycle over a snapshot
pub fn run_cycle(input: &CycleInput) -> CycleOutcome {
    let aggregator = MarketAggregator::new();
    let stability = aggregator.aggregate(&input.metrics);

    let phase = phase::evaluate(
        input.current_phase,
        stability.mss,
        &stability.risk,
        input.governance_frozen,
    );

    // Tranches are checked against the phase the cycle decided on
    let unlocks = liquidity::evaluate_vault(stability.mss, phase.next_phase, &input.tranches);

    let approved = unlocks
        .iter()
        .filter(|d| d.should_unlock)
        .map(|d| d.tranche_index)
        .collect();
    let freeze_recommended = unlocks.iter().any(|d| d.should_freeze);

    let record = CycleRecord::new(
        input.token_id,
        stability.mss,
        input.current_phase,
        phase.next_phase,
        input.governance_frozen,
        approved,
        freeze_recommended,
    );

    CycleOutcome {
        stability,
        phase,
        unlocks,
        record,
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Phase Transition Evaluator
//!
//! State machine rules, evaluated in strict order:
//! 1. Governance freeze -> hold the current phase
//! 2. Emergency risk -> force Protective, regardless of distance
//! 3. MSS band target; upward moves limited to one step per call,
//!    downward moves applied immediately

use crate::types::{Phase, PhaseDecision, RiskSignals};

/// Evaluate the next phase for a token
pub fn evaluate(
    current_phase: Phase,
    mss: u8,
    risk: &RiskSignals,
    governance_frozen: bool,
) -> PhaseDecision {
    if governance_frozen {
        return PhaseDecision::new(
            current_phase,
            current_phase,
            mss,
            format!(
                "governance freeze active; holding {} at MSS {}",
                current_phase, mss
            ),
        );
    }

    if risk.is_emergency() {
        return PhaseDecision::new(
            current_phase,
            Phase::Protective,
            mss,
            format!(
                "emergency downgrade {} -> {}: volatility_risk={:.2} liquidity_stress={:.2} at MSS {}",
                current_phase,
                Phase::Protective,
                risk.volatility_risk,
                risk.liquidity_stress,
                mss
            ),
        );
    }

    let target = Phase::from_mss(mss);

    // Upward movement is rate-limited to one step; the min() never
    // constrains a downward move, which lands on the band target in the
    // same call
    let next = target.min(current_phase.step_up());

    let reason = if next > current_phase {
        format!("MSS {} advances {} -> {}", mss, current_phase, next)
    } else if next < current_phase {
        format!("MSS {} demotes {} -> {}", mss, current_phase, next)
    } else {
        format!("MSS {} holds {}", mss, current_phase)
    };

    PhaseDecision::new(current_phase, next, mss, reason)
}

/// Stateful phase tracker driving the pure evaluator
///
/// Holds a token's current phase and governance flag, and applies each
/// decision as it is made.
#[derive(Debug)]
pub struct PhaseTracker {
    /// Current phase
    phase: Phase,
    /// Externally asserted freeze flag
    governance_frozen: bool,
    /// Last MSS seen
    last_mss: u8,
    /// Number of updates
    update_count: u64,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTracker {
    /// Create new tracker starting in Protective
    pub fn new() -> Self {
        Self::with_phase(Phase::Protective)
    }

    /// Create new tracker at a given phase
    pub fn with_phase(phase: Phase) -> Self {
        Self {
            phase,
            governance_frozen: false,
            last_mss: 0,
            update_count: 0,
        }
    }

    /// Evaluate with a new MSS and apply the resulting transition
    pub fn update(&mut self, mss: u8, risk: &RiskSignals) -> PhaseDecision {
        let decision = evaluate(self.phase, mss, risk, self.governance_frozen);
        self.apply(&decision);
        decision
    }

    /// Adopt the result of an externally-run evaluation
    pub fn apply(&mut self, decision: &PhaseDecision) {
        self.last_mss = decision.mss;
        self.update_count += 1;
        self.phase = decision.next_phase;
    }

    /// Get current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Get last MSS
    pub fn last_mss(&self) -> u8 {
        self.last_mss
    }

    /// Get update count
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Is the governance freeze asserted?
    pub fn governance_frozen(&self) -> bool {
        self.governance_frozen
    }

    /// Assert or clear the governance freeze
    pub fn set_governance_frozen(&mut self, frozen: bool) {
        self.governance_frozen = frozen;
    }

    /// Reset tracker to initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Liquidity Unlock Evaluator
//!
//! Decides, per vault tranche, whether to release funds or freeze the
//! vault. Rules are checked in order and the first match decides:
//! 1. MSS below the hard-freeze floor -> freeze the vault
//! 2. MSS below the tranche threshold -> hold
//! 3. Phase below the tranche requirement -> hold
//! 4. Otherwise -> release

use crate::types::{Phase, Tranche, UnlockDecision};
use crate::MSS_HARD_FREEZE;

/// Evaluate one tranche against the current MSS and phase
///
/// `tranche_index` and `total_tranches` identify the tranche for the
/// caller's bookkeeping; they do not alter the decision.
pub fn evaluate(
    mss: u8,
    tranche_index: u32,
    total_tranches: u32,
    mss_threshold: u8,
    phase_required: Phase,
    current_phase: Phase,
) -> UnlockDecision {
    // The hard freeze is absolute and preempts the tranche's own
    // threshold, even one set below the floor
    if mss < MSS_HARD_FREEZE {
        return UnlockDecision::new(
            tranche_index,
            total_tranches,
            false,
            true,
            format!(
                "MSS {} below hard-freeze floor {}; vault frozen",
                mss, MSS_HARD_FREEZE
            ),
        );
    }

    if mss < mss_threshold {
        return UnlockDecision::new(
            tranche_index,
            total_tranches,
            false,
            false,
            format!("MSS {} below tranche threshold {}", mss, mss_threshold),
        );
    }

    if current_phase < phase_required {
        return UnlockDecision::new(
            tranche_index,
            total_tranches,
            false,
            false,
            format!(
                "phase {} below required {}",
                current_phase, phase_required
            ),
        );
    }

    UnlockDecision::new(
        tranche_index,
        total_tranches,
        true,
        false,
        format!(
            "MSS {} meets threshold {}; phase {} meets required {}",
            mss, mss_threshold, current_phase, phase_required
        ),
    )
}

/// Evaluate one tranche of a vault
pub fn evaluate_tranche(
    mss: u8,
    current_phase: Phase,
    tranche: &Tranche,
    total_tranches: u32,
) -> UnlockDecision {
    evaluate(
        mss,
        tranche.index,
        total_tranches,
        tranche.mss_threshold,
        tranche.phase_required,
        current_phase,
    )
}

/// Evaluate every tranche of a vault, one fresh decision each
pub fn evaluate_vault(mss: u8, current_phase: Phase, tranches: &[Tranche]) -> Vec<UnlockDecision> {
    let total = tranches.len() as u32;
    tranches
        .iter()
        .map(|t| evaluate_tranche(mss, current_phase, t, total))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

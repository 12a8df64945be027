//! Reputation Scorer
//!
//! Converts a wallet's behavior history into a 0-100 trust score and an
//! allocation weight used to size sale allocations.

use crate::types::{ReputationBreakdown, ReputationScore, WalletHistory};
use crate::{
    BLEND_NEW, BLEND_PREVIOUS, BOT_PENALTY, DUMP_PENALTY, DUMP_PENALTY_CAP, HOLDING_BRACKETS,
    REPUTATION_BASELINE,
};

/// Scorer for wallet reputation
#[derive(Debug, Default)]
pub struct ReputationScorer;

impl ReputationScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Score a wallet from its behavior history
    ///
    /// Pure and total: negative numeric inputs are coerced to zero at the
    /// boundary, and the result is always in 0-100.
    pub fn score(&self, wallet: impl Into<String>, history: &WalletHistory) -> ReputationScore {
        let holding_hours = history.holding_hours.max(0.0);

        let mut score = REPUTATION_BASELINE;

        // Holding-duration bonus: first matching bracket wins, largest first
        for (hours, bonus) in HOLDING_BRACKETS {
            if holding_hours > hours {
                score += bonus;
                break;
            }
        }

        score -= (history.dump_count as i32 * DUMP_PENALTY).min(DUMP_PENALTY_CAP);

        if history.is_bot_suspect {
            score -= BOT_PENALTY;
        }

        let mut score = score.clamp(0, 100);

        // Exponential smoothing against the previous score, applied after
        // all bracket and penalty adjustments
        if let Some(previous) = history.previous_score {
            let blended = score as f64 * BLEND_NEW + previous as f64 * BLEND_PREVIOUS;
            score = (blended.round() as i32).clamp(0, 100);
        }

        ReputationScore {
            wallet: wallet.into(),
            score: score as u8,
            allocation_weight: round4(score as f64 / 100.0),
            breakdown: ReputationBreakdown {
                holding_hours,
                dump_count: history.dump_count,
                is_bot_suspect: history.is_bot_suspect,
            },
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Round to 4 decimal places
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_holder_scores_eighty() {
        let scorer = ReputationScorer::new();
        let result = scorer.score(
            "0xabc",
            &WalletHistory {
                holding_hours: 200.0,
                dump_count: 0,
                is_bot_suspect: false,
                previous_score: None,
            },
        );
        assert_eq!(result.score, 80);
        assert_eq!(result.allocation_weight, 0.8);
    }

    #[test]
    fn test_dumping_bot_clamps_then_blends() {
        let scorer = ReputationScorer::new();
        let result = scorer.score(
            "0xabc",
            &WalletHistory {
                holding_hours: 0.0,
                dump_count: 5,
                is_bot_suspect: true,
                previous_score: Some(80),
            },
        );
        // 50 - 40 (capped) - 40 = -30 -> clamped to 0 -> round(0*0.7 + 80*0.3)
        assert_eq!(result.score, 24);
        assert_eq!(result.allocation_weight, 0.24);
    }

    #[test]
    fn test_bracket_boundaries_are_exclusive() {
        let scorer = ReputationScorer::new();
        let score_at = |hours: f64| scorer.score("w", &WalletHistory {
            holding_hours: hours,
            ..Default::default()
        }).score;

        assert_eq!(score_at(0.5), 50);  // no bracket
        assert_eq!(score_at(1.0), 50);  // exactly 1h does not clear >1h
        assert_eq!(score_at(2.0), 55);
        assert_eq!(score_at(24.0), 55); // still in the >1h bracket
        assert_eq!(score_at(25.0), 60);
        assert_eq!(score_at(100.0), 70);
        assert_eq!(score_at(169.0), 80);
    }

    #[test]
    fn test_dump_penalty_caps_at_forty() {
        let scorer = ReputationScorer::new();
        let four = scorer.score("w", &WalletHistory { dump_count: 4, ..Default::default() });
        let forty = scorer.score("w", &WalletHistory { dump_count: 40, ..Default::default() });
        assert_eq!(four.score, 10);
        assert_eq!(forty.score, 10);
    }

    #[test]
    fn test_blend_fixed_point() {
        let scorer = ReputationScorer::new();
        let history = WalletHistory {
            holding_hours: 200.0,
            ..Default::default()
        };
        let unblended = scorer.score("w", &history).score;

        let rescored = scorer.score("w", &WalletHistory {
            previous_score: Some(unblended),
            ..history
        });
        assert_eq!(rescored.score, unblended);
    }

    #[test]
    fn test_negative_holding_hours_coerced() {
        let scorer = ReputationScorer::new();
        let result = scorer.score("w", &WalletHistory {
            holding_hours: -5.0,
            ..Default::default()
        });
        assert_eq!(result.score, 50);
        assert_eq!(result.breakdown.holding_hours, 0.0);
    }

    #[test]
    fn test_default_history_is_baseline() {
        let scorer = ReputationScorer::new();
        let result = scorer.score("w", &WalletHistory::default());
        assert_eq!(result.score, 50);
        assert_eq!(result.allocation_weight, 0.5);
    }

    #[test]
    fn test_score_always_in_range() {
        let scorer = ReputationScorer::new();
        let worst = scorer.score("w", &WalletHistory {
            holding_hours: 0.0,
            dump_count: 100,
            is_bot_suspect: true,
            previous_score: Some(0),
        });
        assert_eq!(worst.score, 0);

        let best = scorer.score("w", &WalletHistory {
            holding_hours: 10_000.0,
            dump_count: 0,
            is_bot_suspect: false,
            previous_score: Some(100),
        });
        assert!(best.score <= 100);
    }

    #[test]
    fn test_breakdown_echoes_inputs() {
        let scorer = ReputationScorer::new();
        let result = scorer.score("w", &WalletHistory {
            holding_hours: 30.0,
            dump_count: 2,
            is_bot_suspect: true,
            previous_score: None,
        });
        assert_eq!(result.breakdown.holding_hours, 30.0);
        assert_eq!(result.breakdown.dump_count, 2);
        assert!(result.breakdown.is_bot_suspect);
    }
}

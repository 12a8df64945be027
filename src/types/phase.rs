//! Token lifecycle phase definitions

use serde::{Deserialize, Serialize};
use crate::{MSS_BAND_EXPANSION, MSS_BAND_GOVERNANCE, MSS_BAND_GROWTH};

/// The four lifecycle phases of a launched token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Maximum protections, high taxes, tight transaction limits
    Protective = 0,
    /// Normal conditions, protections easing
    Growth = 1,
    /// Relaxed limits, deepening liquidity
    Expansion = 2,
    /// Community-controlled end state
    Governance = 3,
}

impl Phase {
    /// Ordinal position (0-3)
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Phase for an ordinal, clamping out-of-range values to Governance
    pub fn from_ordinal(ord: u8) -> Self {
        match ord {
            0 => Phase::Protective,
            1 => Phase::Growth,
            2 => Phase::Expansion,
            _ => Phase::Governance,
        }
    }

    /// Target phase for an MSS value (fixed band mapping)
    pub fn from_mss(mss: u8) -> Self {
        if mss < MSS_BAND_GROWTH {
            Phase::Protective
        } else if mss < MSS_BAND_EXPANSION {
            Phase::Growth
        } else if mss < MSS_BAND_GOVERNANCE {
            Phase::Expansion
        } else {
            Phase::Governance
        }
    }

    /// Next phase up, saturating at Governance
    pub fn step_up(&self) -> Self {
        Self::from_ordinal(self.ordinal().saturating_add(1))
    }

    /// Parse a phase from its label or ordinal
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protective" | "0" => Some(Phase::Protective),
            "growth" | "1" => Some(Phase::Growth),
            "expansion" | "2" => Some(Phase::Expansion),
            "governance" | "3" => Some(Phase::Governance),
            _ => None,
        }
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Phase::Protective => "\x1b[31m", // Red
            Phase::Growth => "\x1b[33m",     // Yellow
            Phase::Expansion => "\x1b[32m",  // Green
            Phase::Governance => "\x1b[36m", // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for phase
    pub fn emoji(&self) -> &'static str {
        match self {
            Phase::Protective => "🛡",
            Phase::Growth => "🌱",
            Phase::Expansion => "📈",
            Phase::Governance => "🏛",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Protective => "PROTECTIVE",
            Phase::Growth => "GROWTH",
            Phase::Expansion => "EXPANSION",
            Phase::Governance => "GOVERNANCE",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_mapping() {
        assert_eq!(Phase::from_mss(0), Phase::Protective);
        assert_eq!(Phase::from_mss(39), Phase::Protective);
        assert_eq!(Phase::from_mss(40), Phase::Growth);
        assert_eq!(Phase::from_mss(69), Phase::Growth);
        assert_eq!(Phase::from_mss(70), Phase::Expansion);
        assert_eq!(Phase::from_mss(89), Phase::Expansion);
        assert_eq!(Phase::from_mss(90), Phase::Governance);
        assert_eq!(Phase::from_mss(100), Phase::Governance);
    }

    #[test]
    fn test_step_up_saturates() {
        assert_eq!(Phase::Protective.step_up(), Phase::Growth);
        assert_eq!(Phase::Governance.step_up(), Phase::Governance);
    }

    #[test]
    fn test_ordinal_round_trip() {
        for ord in 0..4 {
            assert_eq!(Phase::from_ordinal(ord).ordinal(), ord);
        }
        assert_eq!(Phase::from_ordinal(7), Phase::Governance);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Phase::from_label("growth"), Some(Phase::Growth));
        assert_eq!(Phase::from_label("GOVERNANCE"), Some(Phase::Governance));
        assert_eq!(Phase::from_label("2"), Some(Phase::Expansion));
        assert_eq!(Phase::from_label("larval"), None);
    }

    #[test]
    fn test_ordering_follows_lifecycle() {
        assert!(Phase::Protective < Phase::Growth);
        assert!(Phase::Expansion < Phase::Governance);
    }
}

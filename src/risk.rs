//! Discrete risk taxonomy over a condition probability.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability above which a condition is [`RiskTier::High`].
pub const HIGH_THRESHOLD: f64 = 0.70;
/// Probability above which a condition is at least [`RiskTier::Moderate`].
pub const MODERATE_THRESHOLD: f64 = 0.50;
/// Probability above which a condition is at least [`RiskTier::Low`].
pub const LOW_THRESHOLD: f64 = 0.30;

/// Ordinal risk tier, `Minimal < Low < Moderate < High`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Minimal,
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::Minimal,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
    ];

    /// Map a probability to its tier. Every threshold is exclusive, so a
    /// probability sitting exactly on a boundary lands in the lower tier.
    pub fn from_probability(p: f64) -> Self {
        if p > HIGH_THRESHOLD {
            RiskTier::High
        } else if p > MODERATE_THRESHOLD {
            RiskTier::Moderate
        } else if p > LOW_THRESHOLD {
            RiskTier::Low
        } else {
            RiskTier::Minimal
        }
    }

    /// Whether the tier calls for counselling follow-up.
    pub fn is_elevated(&self) -> bool {
        *self >= RiskTier::Moderate
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskTier::Minimal => "Minimal",
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

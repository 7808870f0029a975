use std::fmt;

use biorisk_rules::RecommendationTier;
use serde::{Deserialize, Serialize};

/// Highest possible risk value.
pub const MAX_RISK: u8 = 100;

/// Ordered risk label derived from a 0-100 risk value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Minimal,
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    /// Score bands: `<10` Minimal, `<25` Very Low, `<40` Low, `<60` Moderate,
    /// `<75` High, otherwise Very High.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=9 => RiskLevel::Minimal,
            10..=24 => RiskLevel::VeryLow,
            25..=39 => RiskLevel::Low,
            40..=59 => RiskLevel::Moderate,
            60..=74 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }

    pub fn tier(self) -> RecommendationTier {
        match self {
            RiskLevel::Minimal | RiskLevel::VeryLow => RecommendationTier::Routine,
            RiskLevel::Low | RiskLevel::Moderate => RecommendationTier::FollowUp,
            RiskLevel::High | RiskLevel::VeryHigh => RecommendationTier::Urgent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Minimal => "Minimal",
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the normal interval raises risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HigherIsWorse,
    LowerIsWorse,
    OutsideIsWorse,
}

impl Direction {
    fn scores_above(self) -> bool {
        matches!(self, Direction::HigherIsWorse | Direction::OutsideIsWorse)
    }

    fn scores_below(self) -> bool {
        matches!(self, Direction::LowerIsWorse | Direction::OutsideIsWorse)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::HigherIsWorse => "higher is worse",
            Direction::LowerIsWorse => "lower is worse",
            Direction::OutsideIsWorse => "outside is worse",
        })
    }
}

/// Closed interval with optional bounds. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl Interval {
    pub fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Interval { low, high }
    }

    pub fn is_unbounded(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.low.map_or(true, |low| value >= low) && self.high.map_or(true, |high| value <= high)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.low, self.high) {
            (Some(low), Some(high)) => write!(f, "[{low}, {high}]"),
            (Some(low), None) => write!(f, ">= {low}"),
            (None, Some(high)) => write!(f, "<= {high}"),
            (None, None) => f.write_str("any"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

/// Position of a reading relative to a rule's normal interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Normal,
    Mild(Side),
    Severe(Side),
}

/// Optional factor wording per classification. `{value}` is replaced with the
/// formatted reading. The `*_below` entries override `mild` / `severe` on the
/// low side of the normal range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactorTexts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mild: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mild_below: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severe_below: Option<String>,
}

impl FactorTexts {
    pub fn is_empty(&self) -> bool {
        self.templates().all(|t| t.is_none())
    }

    fn templates(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        [
            &self.normal,
            &self.mild,
            &self.severe,
            &self.mild_below,
            &self.severe_below,
        ]
        .into_iter()
        .map(Option::as_deref)
    }

    pub fn template(&self, classification: Classification) -> Option<&str> {
        match classification {
            Classification::Normal => self.normal.as_deref(),
            Classification::Mild(Side::Above) => self.mild.as_deref(),
            Classification::Mild(Side::Below) => {
                self.mild_below.as_deref().or(self.mild.as_deref())
            }
            Classification::Severe(Side::Above) => self.severe.as_deref(),
            Classification::Severe(Side::Below) => {
                self.severe_below.as_deref().or(self.severe.as_deref())
            }
        }
    }

    /// Fills in the template for `classification`, if one is configured.
    pub fn render(&self, classification: Classification, value: &str) -> Option<String> {
        self.template(classification)
            .map(|template| template.replace("{value}", value))
    }
}

fn inclusive_by_default() -> bool {
    true
}

fn is_true(flag: &bool) -> bool {
    *flag
}

/// One biomarker's contribution to a disease score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeRule {
    pub biomarker: String,
    pub direction: Direction,
    pub normal: Interval,
    #[serde(default, skip_serializing_if = "Interval::is_unbounded")]
    pub severe: Interval,
    /// Whether a reading exactly on a severe bound counts as severe.
    #[serde(default = "inclusive_by_default", skip_serializing_if = "is_true")]
    pub severe_inclusive: bool,
    pub mild_weight: u32,
    /// Weight of a mild reading below the normal range, when it differs from
    /// `mild_weight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mild_weight_below: Option<u32>,
    #[serde(default)]
    pub severe_weight: u32,
    #[serde(default, skip_serializing_if = "FactorTexts::is_empty")]
    pub text: FactorTexts,
}

impl RangeRule {
    /// Normal bounds are inclusive. A value strictly beyond a scored normal
    /// bound is abnormal, and severe once it reaches the matching severe bound
    /// (or passes it, when `severe_inclusive` is off).
    pub fn classify(&self, value: f64) -> Classification {
        let above = self.direction.scores_above() && self.normal.high.is_some_and(|h| value > h);
        let below = self.direction.scores_below() && self.normal.low.is_some_and(|l| value < l);
        let inclusive = self.severe_inclusive;
        if above {
            if self.severe.high.is_some_and(|s| if inclusive { value >= s } else { value > s }) {
                Classification::Severe(Side::Above)
            } else {
                Classification::Mild(Side::Above)
            }
        } else if below {
            if self.severe.low.is_some_and(|s| if inclusive { value <= s } else { value < s }) {
                Classification::Severe(Side::Below)
            } else {
                Classification::Mild(Side::Below)
            }
        } else {
            Classification::Normal
        }
    }

    pub fn contribution(&self, classification: Classification) -> u32 {
        match classification {
            Classification::Normal => 0,
            Classification::Mild(Side::Above) => self.mild_weight,
            Classification::Mild(Side::Below) => self.mild_weight_below.unwrap_or(self.mild_weight),
            Classification::Severe(_) => self.severe_weight,
        }
    }

    /// Structural checks that do not depend on the owning fluid.
    pub(crate) fn check(&self) -> Result<(), String> {
        let bounds = [
            self.normal.low,
            self.normal.high,
            self.severe.low,
            self.severe.high,
        ];
        if bounds.iter().flatten().any(|b| !b.is_finite()) {
            return Err("bounds must be finite".into());
        }
        if let (Some(low), Some(high)) = (self.normal.low, self.normal.high) {
            if low > high {
                return Err(format!("normal range {} is inverted", self.normal));
            }
        }
        if self.direction.scores_above() && !self.direction.scores_below() && self.normal.high.is_none() {
            return Err(format!("{} needs an upper normal bound", self.direction));
        }
        if self.direction.scores_below() && !self.direction.scores_above() && self.normal.low.is_none() {
            return Err(format!("{} needs a lower normal bound", self.direction));
        }
        if self.normal.is_unbounded() {
            return Err("normal range must have at least one bound".into());
        }
        if let Some(severe) = self.severe.high {
            if !self.direction.scores_above() {
                return Err(format!("upper severe bound has no effect when {}", self.direction));
            }
            match self.normal.high {
                Some(high) if severe > high => {}
                _ => return Err("upper severe bound must lie above the normal range".into()),
            }
        }
        if let Some(severe) = self.severe.low {
            if !self.direction.scores_below() {
                return Err(format!("lower severe bound has no effect when {}", self.direction));
            }
            match self.normal.low {
                Some(low) if severe < low => {}
                _ => return Err("lower severe bound must lie below the normal range".into()),
            }
        }
        if self.mild_weight_below.is_some() && !self.direction.scores_below() {
            return Err(format!("mild_weight_below has no effect when {}", self.direction));
        }
        if self.severe.high.is_some() && self.severe_weight < self.mild_weight {
            return Err(format!(
                "severe weight {} is below mild weight {}",
                self.severe_weight, self.mild_weight
            ));
        }
        let mild_below = self.mild_weight_below.unwrap_or(self.mild_weight);
        if self.severe.low.is_some() && self.severe_weight < mild_below {
            return Err(format!(
                "severe weight {} is below mild weight {mild_below}",
                self.severe_weight
            ));
        }
        if self.text.templates().flatten().any(|t| t.trim().is_empty()) {
            return Err("factor text must not be blank".into());
        }
        Ok(())
    }
}

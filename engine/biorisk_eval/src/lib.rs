//! Risk evaluator.
//!
//! Turns validated biomarker readings into one [`DiseasePrediction`] per
//! disease the rule table declares for the readings' fluid:
//!
//! ```
//! use std::collections::BTreeMap;
//! use biorisk_eval::{RiskEvaluator, RiskLevel};
//! use biorisk_rules::RuleTable;
//!
//! let table = RuleTable::builtin().unwrap();
//! let evaluator = RiskEvaluator::new(&table);
//!
//! let mut readings = BTreeMap::new();
//! readings.insert("glucose".to_string(), Some(126.0));
//! readings.insert("hba1c".to_string(), Some(6.6));
//!
//! let predictions = evaluator.evaluate("blood", &readings).unwrap();
//! let diabetes = predictions.get("diabetes").unwrap();
//! assert!(diabetes.risk_level >= RiskLevel::Moderate);
//! assert!(predictions.get("cardiovascular").is_none());
//! ```
//!
//! Scoring is a capped integer sum of per-rule contributions, so the result
//! does not depend on rule order and repeated calls return identical output.

pub mod evaluator;
pub mod level;
pub mod prediction;
pub mod record;

pub use evaluator::{EvaluationError, RiskEvaluator};
pub use level::{RiskLevel, MAX_RISK};
pub use prediction::{DiseasePrediction, Factor, FactorType, Predictions};
pub use record::AssessmentRecord;

//! Reference rule table.
//!
//! Maps each (fluid, disease) pair to an ordered list of [`RangeRule`]s and a
//! recommendation text per [`RecommendationTier`]. Tables are written in TOML
//! and checked once at load time; any inconsistency is a
//! [`ConfigurationError`] and the table is never handed out.

pub mod error;
pub mod rule;
pub mod table;

pub use error::ConfigurationError;
pub use rule::{Classification, Direction, FactorTexts, Interval, RangeRule, Side};
pub use table::{
    DiseaseRules, RecommendationTier, Recommendations, RuleTable, BUILTIN_RULES,
};

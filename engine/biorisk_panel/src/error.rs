use thiserror::Error;

use crate::fluid::FluidType;

/// Malformed or out-of-domain biomarker input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown biomarker '{name}' for the {fluid} panel")]
    UnknownBiomarker { fluid: FluidType, name: String },
    #[error("biomarker '{name}' must be a finite number, got {value}")]
    NonFinite { name: String, value: f64 },
    #[error("biomarker '{name}' value {actual} is outside the accepted range [{min}, {max}]")]
    OutOfRange {
        name: String,
        min: f64,
        max: f64,
        actual: f64,
    },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::UnknownBiomarker { name, .. }
            | ValidationError::NonFinite { name, .. }
            | ValidationError::OutOfRange { name, .. } => name,
        }
    }
}

/// A fluid tag outside `blood`, `saliva`, `urine` and `csf`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fluid type '{0}', expected one of: blood, saliva, urine, csf")]
pub struct UnknownFluidTypeError(pub String);

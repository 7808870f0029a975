use std::path::PathBuf;

use biorisk_panel::{FluidType, UnknownFluidTypeError};
use thiserror::Error;

/// The rule table failed to load or failed its self-check.
///
/// Always fatal: a process must not evaluate against a table that produced
/// one of these.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse rule table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("rule table entry '{disease}': {source}")]
    UnknownFluid {
        disease: String,
        #[source]
        source: UnknownFluidTypeError,
    },
    #[error("disease '{disease}' ({fluid}) uses biomarker '{biomarker}', which is not part of the {fluid} panel")]
    ForeignBiomarker {
        fluid: FluidType,
        disease: String,
        biomarker: String,
    },
    #[error("disease '{disease}' is declared more than once for {fluid}")]
    DuplicateDisease { fluid: FluidType, disease: String },
    #[error("disease '{disease}' ({fluid}) has more than one rule for '{biomarker}'")]
    DuplicateRule {
        fluid: FluidType,
        disease: String,
        biomarker: String,
    },
    #[error("disease '{disease}' ({fluid}) declares no rules")]
    EmptyDisease { fluid: FluidType, disease: String },
    #[error("disease '{disease}' ({fluid}) has an empty {field}")]
    MissingText {
        fluid: FluidType,
        disease: String,
        field: &'static str,
    },
    #[error("disease '{disease}' ({fluid}), rule '{biomarker}': {reason}")]
    InvalidRule {
        fluid: FluidType,
        disease: String,
        biomarker: String,
        reason: String,
    },
}

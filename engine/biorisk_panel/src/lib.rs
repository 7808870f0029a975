//! Biomarker input model.
//!
//! A request names a fluid type and supplies a map of biomarker name to an
//! optional number. [`Readings::parse`] checks that map against the closed
//! catalog of the fluid's panel and keeps only measured, finite values:
//!
//! ```
//! use std::collections::BTreeMap;
//! use biorisk_panel::{FluidType, Readings};
//!
//! let mut raw = BTreeMap::new();
//! raw.insert("glucose".to_string(), Some(126.0));
//! raw.insert("hba1c".to_string(), None);
//! let readings = Readings::parse(FluidType::Blood, &raw).unwrap();
//! assert_eq!(readings.get("glucose"), Some(126.0));
//! assert!(readings.get("hba1c").is_none());
//! ```
//!
//! The typed panels ([`BloodPanel`], [`SalivaPanel`], [`UrinePanel`],
//! [`CsfPanel`]) carry the same fields as `Option<f64>` members.

pub mod catalog;
pub mod error;
pub mod fluid;
pub mod panel;
pub mod readings;

pub use catalog::BiomarkerSpec;
pub use error::{UnknownFluidTypeError, ValidationError};
pub use fluid::FluidType;
pub use panel::{BiomarkerPanel, BloodPanel, CsfPanel, SalivaPanel, UrinePanel};
pub use readings::Readings;

use std::collections::BTreeMap;

use crate::catalog::BiomarkerSpec;
use crate::error::ValidationError;
use crate::fluid::FluidType;

/// Validated, fluid-scoped biomarker values. Unmeasured biomarkers are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Readings {
    fluid: FluidType,
    values: BTreeMap<&'static str, f64>,
}

impl Readings {
    pub fn empty(fluid: FluidType) -> Self {
        Readings {
            fluid,
            values: BTreeMap::new(),
        }
    }

    /// Validates a raw `name -> value` map against the fluid's panel.
    ///
    /// `None` entries mean "not measured" and are dropped. Keys are checked in
    /// sorted order, so the first offending key reported is deterministic.
    pub fn parse(
        fluid: FluidType,
        raw: &BTreeMap<String, Option<f64>>,
    ) -> Result<Self, ValidationError> {
        Self::from_entries(fluid, raw.iter().map(|(k, v)| (k.as_str(), *v)))
    }

    pub(crate) fn from_entries<'a>(
        fluid: FluidType,
        entries: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Result<Self, ValidationError> {
        let mut readings = Readings::empty(fluid);
        for (name, value) in entries {
            let spec = fluid
                .biomarker(name)
                .ok_or_else(|| ValidationError::UnknownBiomarker {
                    fluid,
                    name: name.to_string(),
                })?;
            if let Some(value) = value {
                readings.insert(spec, value)?;
            }
        }
        log::trace!(
            "validated {} {} reading(s)",
            readings.values.len(),
            readings.fluid
        );
        Ok(readings)
    }

    fn insert(&mut self, spec: &'static BiomarkerSpec, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite {
                name: spec.name.to_string(),
                value,
            });
        }
        if !spec.accepts(value) {
            return Err(ValidationError::OutOfRange {
                name: spec.name.to_string(),
                min: spec.min,
                max: spec.max,
                actual: value,
            });
        }
        self.values.insert(spec.name, value);
        Ok(())
    }

    pub fn fluid(&self) -> FluidType {
        self.fluid
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn values(&self) -> &BTreeMap<&'static str, f64> {
        &self.values
    }
}

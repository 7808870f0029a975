use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{BiomarkerSpec, BLOOD, CSF, SALIVA, URINE};
use crate::error::UnknownFluidTypeError;

/// Specimen category that scopes which biomarkers and diseases apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluidType {
    Blood,
    Saliva,
    Urine,
    Csf,
}

impl FluidType {
    pub const ALL: [FluidType; 4] = [
        FluidType::Blood,
        FluidType::Saliva,
        FluidType::Urine,
        FluidType::Csf,
    ];

    /// Wire tag used in requests and rule tables.
    pub fn as_str(self) -> &'static str {
        match self {
            FluidType::Blood => "blood",
            FluidType::Saliva => "saliva",
            FluidType::Urine => "urine",
            FluidType::Csf => "csf",
        }
    }

    /// Closed set of biomarkers recognised for this fluid, in form order.
    pub fn biomarkers(self) -> &'static [BiomarkerSpec] {
        match self {
            FluidType::Blood => BLOOD,
            FluidType::Saliva => SALIVA,
            FluidType::Urine => URINE,
            FluidType::Csf => CSF,
        }
    }

    pub fn biomarker(self, name: &str) -> Option<&'static BiomarkerSpec> {
        self.biomarkers().iter().find(|spec| spec.name == name)
    }

    pub fn recognizes(self, name: &str) -> bool {
        self.biomarker(name).is_some()
    }
}

impl fmt::Display for FluidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FluidType {
    type Err = UnknownFluidTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FluidType::ALL
            .into_iter()
            .find(|fluid| fluid.as_str() == s)
            .ok_or_else(|| UnknownFluidTypeError(s.to_string()))
    }
}

//! Typed per-fluid panels: one optional field per recognised biomarker.
//!
//! Panels deserialize from the same JSON bodies the raw map accepts, but
//! reject unknown fields at parse time.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fluid::FluidType;
use crate::readings::Readings;

/// A statically-typed biomarker form for one fluid.
pub trait BiomarkerPanel {
    const FLUID: FluidType;

    /// Every field as `(wire name, value)`, in declaration order.
    fn entries(&self) -> Vec<(&'static str, Option<f64>)>;

    fn to_readings(&self) -> Result<Readings, ValidationError> {
        Readings::from_entries(Self::FLUID, self.entries())
    }
}

macro_rules! biomarker_panel {
    ($(#[$meta:meta])* $name:ident, $fluid:expr, { $($field:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<f64>,
            )+
        }

        impl BiomarkerPanel for $name {
            const FLUID: FluidType = $fluid;

            fn entries(&self) -> Vec<(&'static str, Option<f64>)> {
                vec![$(($wire, self.$field)),+]
            }
        }
    };
}

biomarker_panel!(
    /// Blood chemistry panel.
    BloodPanel, FluidType::Blood, {
        glucose => "glucose",
        hba1c => "hba1c",
        triglycerides => "triglycerides",
        total_cholesterol => "totalCholesterol",
        ldl => "ldl",
        hdl => "hdl",
        crp => "crp",
        homocysteine => "homocysteine",
    }
);

biomarker_panel!(
    /// Salivary inflammatory and tumour markers.
    SalivaPanel, FluidType::Saliva, {
        il6 => "il6",
        tnf_alpha => "tnfAlpha",
        mmp9 => "mmp9",
        saliva_cortisol => "salivaCortisol",
        cyfra21 => "cyfra21",
        cd44 => "cd44",
    }
);

biomarker_panel!(
    /// Urinalysis panel.
    UrinePanel, FluidType::Urine, {
        urine_glucose => "urineGlucose",
        albumin => "albumin",
        creatinine => "creatinine",
        acr => "acr",
        protein => "protein",
        specific_gravity => "specificGravity",
        ngal => "ngal",
        kim1 => "kim1",
    }
);

biomarker_panel!(
    /// Cerebrospinal fluid panel.
    CsfPanel, FluidType::Csf, {
        abeta42 => "abeta42",
        total_tau => "totalTau",
        p_tau => "pTau",
        nfl => "nfl",
        csf_glucose => "csfGlucose",
        csf_protein => "csfProtein",
        csf_ldh => "csfLdh",
        cell_count => "cellCount",
    }
);

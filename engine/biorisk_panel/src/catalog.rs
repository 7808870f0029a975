// Recognised biomarkers per fluid panel.
// Accepted ranges only reject physically implausible entries; they are not
// reference ranges and play no part in scoring.

use serde::Serialize;

/// One recognised biomarker of a fluid panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiomarkerSpec {
    /// Wire name, as used in request bodies and rule tables.
    pub name: &'static str,
    /// Human label used in factor text.
    pub label: &'static str,
    /// Display unit; empty for dimensionless measures.
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
}

impl BiomarkerSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        unit: &'static str,
        min: f64,
        max: f64,
    ) -> Self {
        BiomarkerSpec {
            name,
            label,
            unit,
            min,
            max,
        }
    }

    pub fn accepts(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Formats a reading with its unit, e.g. `126 mg/dL` or `1.02`.
    pub fn format_value(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format!("{value}")
        } else if self.unit == "%" {
            format!("{value}%")
        } else {
            format!("{value} {}", self.unit)
        }
    }
}

pub(crate) const BLOOD: &[BiomarkerSpec] = &[
    BiomarkerSpec::new("glucose", "fasting glucose", "mg/dL", 0.0, 1000.0),
    BiomarkerSpec::new("hba1c", "HbA1c", "%", 0.0, 20.0),
    BiomarkerSpec::new("triglycerides", "triglycerides", "mg/dL", 0.0, 5000.0),
    BiomarkerSpec::new("totalCholesterol", "total cholesterol", "mg/dL", 0.0, 1000.0),
    BiomarkerSpec::new("ldl", "LDL cholesterol", "mg/dL", 0.0, 1000.0),
    BiomarkerSpec::new("hdl", "HDL cholesterol", "mg/dL", 0.0, 300.0),
    BiomarkerSpec::new("crp", "CRP", "mg/L", 0.0, 500.0),
    BiomarkerSpec::new("homocysteine", "homocysteine", "µmol/L", 0.0, 500.0),
];

pub(crate) const SALIVA: &[BiomarkerSpec] = &[
    BiomarkerSpec::new("il6", "IL-6", "pg/mL", 0.0, 10_000.0),
    BiomarkerSpec::new("tnfAlpha", "TNF-α", "pg/mL", 0.0, 10_000.0),
    BiomarkerSpec::new("mmp9", "MMP-9", "ng/mL", 0.0, 100_000.0),
    BiomarkerSpec::new("salivaCortisol", "salivary cortisol", "nmol/L", 0.0, 1000.0),
    BiomarkerSpec::new("cyfra21", "CYFRA 21-1", "ng/mL", 0.0, 1000.0),
    BiomarkerSpec::new("cd44", "CD44", "ng/mL", 0.0, 100_000.0),
];

pub(crate) const URINE: &[BiomarkerSpec] = &[
    BiomarkerSpec::new("urineGlucose", "urine glucose", "mg/dL", 0.0, 10_000.0),
    BiomarkerSpec::new("albumin", "albumin", "mg/L", 0.0, 10_000.0),
    BiomarkerSpec::new("creatinine", "creatinine", "mg/dL", 0.0, 1000.0),
    BiomarkerSpec::new("acr", "albumin-to-creatinine ratio", "mg/g", 0.0, 10_000.0),
    BiomarkerSpec::new("protein", "urine protein", "mg/dL", 0.0, 10_000.0),
    BiomarkerSpec::new("specificGravity", "specific gravity", "", 1.0, 1.1),
    BiomarkerSpec::new("ngal", "NGAL", "ng/mL", 0.0, 10_000.0),
    BiomarkerSpec::new("kim1", "KIM-1", "pg/mL", 0.0, 100_000.0),
];

pub(crate) const CSF: &[BiomarkerSpec] = &[
    BiomarkerSpec::new("abeta42", "amyloid β-42", "pg/mL", 0.0, 10_000.0),
    BiomarkerSpec::new("totalTau", "total tau", "pg/mL", 0.0, 10_000.0),
    BiomarkerSpec::new("pTau", "phosphorylated tau", "pg/mL", 0.0, 1000.0),
    BiomarkerSpec::new("nfl", "neurofilament light chain", "pg/mL", 0.0, 100_000.0),
    BiomarkerSpec::new("csfGlucose", "CSF glucose", "mg/dL", 0.0, 1000.0),
    BiomarkerSpec::new("csfProtein", "CSF protein", "mg/dL", 0.0, 5000.0),
    BiomarkerSpec::new("csfLdh", "CSF LDH", "U/L", 0.0, 5000.0),
    BiomarkerSpec::new("cellCount", "cell count", "cells/µL", 0.0, 100_000.0),
];

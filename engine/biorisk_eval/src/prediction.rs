use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::level::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
    Positive,
    Negative,
    Warning,
}

/// One classified observation behind a disease score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    #[serde(rename = "type")]
    pub kind: FactorType,
    pub text: String,
    /// Wire name of the biomarker this factor came from. Not serialized.
    #[serde(skip)]
    pub biomarker: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseasePrediction {
    pub risk_level: RiskLevel,
    pub risk_value: u8,
    pub factors: Vec<Factor>,
    pub recommendation: String,
}

impl DiseasePrediction {
    pub fn factor_for(&self, biomarker: &str) -> Option<&Factor> {
        self.factors.iter().find(|f| f.biomarker == biomarker)
    }
}

/// Disease key to prediction, in rule-table declaration order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    entries: Vec<(String, DiseasePrediction)>,
}

impl Predictions {
    pub(crate) fn push(&mut self, disease: String, prediction: DiseasePrediction) {
        self.entries.push((disease, prediction));
    }

    pub fn get(&self, disease: &str) -> Option<&DiseasePrediction> {
        self.entries
            .iter()
            .find(|(name, _)| name == disease)
            .map(|(_, p)| p)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DiseasePrediction)> + '_ {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Predictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, prediction) in &self.entries {
            map.serialize_entry(name, prediction)?;
        }
        map.end()
    }
}

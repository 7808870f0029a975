use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use biorisk_panel::FluidType;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::rule::RangeRule;

/// Rule table compiled into the crate.
pub const BUILTIN_RULES: &str = include_str!("../rules/default.toml");

/// Coarse grouping of risk levels that selects recommendation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationTier {
    Routine,
    FollowUp,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recommendations {
    pub routine: String,
    pub follow_up: String,
    pub urgent: String,
}

impl Recommendations {
    pub fn for_tier(&self, tier: RecommendationTier) -> &str {
        match tier {
            RecommendationTier::Routine => &self.routine,
            RecommendationTier::FollowUp => &self.follow_up,
            RecommendationTier::Urgent => &self.urgent,
        }
    }
}

/// Rules and recommendation text for one disease within one fluid.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseaseRules {
    pub fluid: FluidType,
    /// Key used in prediction output, e.g. `diabetes` or `brainTumor`.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub rules: Vec<RangeRule>,
    pub recommendations: Recommendations,
}

/// Immutable reference data: every disease the engine can score, in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    diseases: Vec<DiseaseRules>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    #[serde(rename = "disease", default)]
    diseases: Vec<DiseaseEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiseaseEntry {
    fluid: String,
    name: String,
    display_name: String,
    #[serde(default)]
    description: String,
    recommendations: Recommendations,
    #[serde(rename = "rule", default)]
    rules: Vec<RangeRule>,
}

impl RuleTable {
    /// Parses and self-checks a TOML rule table.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigurationError> {
        let file: TableFile = toml::from_str(text)?;
        let mut diseases = Vec::with_capacity(file.diseases.len());
        for entry in file.diseases {
            diseases.push(compile_entry(entry)?);
        }
        let table = RuleTable::new(diseases)?;
        log::info!(
            "loaded rule table: {} disease(s), {} rule(s)",
            table.diseases.len(),
            table.diseases.iter().map(|d| d.rules.len()).sum::<usize>()
        );
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("reading rule table from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// The table compiled into the crate.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Builds a table from already-typed entries, running the same checks as
    /// the TOML loader.
    pub fn new(diseases: Vec<DiseaseRules>) -> Result<Self, ConfigurationError> {
        let mut seen = HashSet::new();
        for disease in &diseases {
            if !seen.insert((disease.fluid, disease.name.as_str())) {
                return Err(ConfigurationError::DuplicateDisease {
                    fluid: disease.fluid,
                    disease: disease.name.clone(),
                });
            }
            check_disease(disease)?;
        }
        Ok(RuleTable { diseases })
    }

    /// Diseases applicable to `fluid`, in declaration order.
    pub fn rules_for(&self, fluid: FluidType) -> impl Iterator<Item = &DiseaseRules> + '_ {
        self.diseases.iter().filter(move |d| d.fluid == fluid)
    }

    pub fn disease(&self, fluid: FluidType, name: &str) -> Option<&DiseaseRules> {
        self.rules_for(fluid).find(|d| d.name == name)
    }

    pub fn diseases(&self) -> &[DiseaseRules] {
        &self.diseases
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}

fn compile_entry(entry: DiseaseEntry) -> Result<DiseaseRules, ConfigurationError> {
    let fluid = entry
        .fluid
        .parse::<FluidType>()
        .map_err(|source| ConfigurationError::UnknownFluid {
            disease: entry.name.clone(),
            source,
        })?;
    Ok(DiseaseRules {
        fluid,
        name: entry.name,
        display_name: entry.display_name,
        description: entry.description,
        rules: entry.rules,
        recommendations: entry.recommendations,
    })
}

fn check_disease(disease: &DiseaseRules) -> Result<(), ConfigurationError> {
    let fluid = disease.fluid;
    let missing = |field: &'static str| ConfigurationError::MissingText {
        fluid,
        disease: disease.name.clone(),
        field,
    };
    if disease.name.trim().is_empty() {
        return Err(missing("name"));
    }
    if disease.display_name.trim().is_empty() {
        return Err(missing("display_name"));
    }
    let recs = &disease.recommendations;
    for (field, text) in [
        ("routine recommendation", &recs.routine),
        ("follow-up recommendation", &recs.follow_up),
        ("urgent recommendation", &recs.urgent),
    ] {
        if text.trim().is_empty() {
            return Err(missing(field));
        }
    }
    if disease.rules.is_empty() {
        return Err(ConfigurationError::EmptyDisease {
            fluid,
            disease: disease.name.clone(),
        });
    }

    let mut biomarkers = HashSet::new();
    for rule in &disease.rules {
        if !fluid.recognizes(&rule.biomarker) {
            return Err(ConfigurationError::ForeignBiomarker {
                fluid,
                disease: disease.name.clone(),
                biomarker: rule.biomarker.clone(),
            });
        }
        if !biomarkers.insert(rule.biomarker.as_str()) {
            return Err(ConfigurationError::DuplicateRule {
                fluid,
                disease: disease.name.clone(),
                biomarker: rule.biomarker.clone(),
            });
        }
        rule.check()
            .map_err(|reason| ConfigurationError::InvalidRule {
                fluid,
                disease: disease.name.clone(),
                biomarker: rule.biomarker.clone(),
                reason,
            })?;
    }
    Ok(())
}

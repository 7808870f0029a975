use std::collections::BTreeMap;

use biorisk_panel::{BiomarkerPanel, FluidType, Readings, UnknownFluidTypeError, ValidationError};
use biorisk_rules::{Classification, DiseaseRules, RangeRule, RuleTable, Side};
use thiserror::Error;

use crate::level::{RiskLevel, MAX_RISK};
use crate::prediction::{DiseasePrediction, Factor, FactorType, Predictions};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    UnknownFluidType(#[from] UnknownFluidTypeError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Scores readings against a borrowed rule table.
///
/// Holds no state of its own; any number of evaluators may share one table
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct RiskEvaluator<'t> {
    table: &'t RuleTable,
}

impl<'t> RiskEvaluator<'t> {
    pub fn new(table: &'t RuleTable) -> Self {
        RiskEvaluator { table }
    }

    pub fn table(&self) -> &'t RuleTable {
        self.table
    }

    /// Validates a raw request and evaluates it.
    pub fn evaluate(
        &self,
        fluid_type: &str,
        readings: &BTreeMap<String, Option<f64>>,
    ) -> Result<Predictions, EvaluationError> {
        let fluid: FluidType = fluid_type.parse()?;
        let readings = Readings::parse(fluid, readings)?;
        Ok(self.evaluate_readings(&readings))
    }

    pub fn evaluate_panel<P: BiomarkerPanel>(
        &self,
        panel: &P,
    ) -> Result<Predictions, EvaluationError> {
        Ok(self.evaluate_readings(&panel.to_readings()?))
    }

    /// Scores every disease of the readings' fluid. Diseases none of whose
    /// biomarkers were supplied are left out.
    pub fn evaluate_readings(&self, readings: &Readings) -> Predictions {
        let mut predictions = Predictions::default();
        for disease in self.table.rules_for(readings.fluid()) {
            match score_disease(disease, readings) {
                Some(prediction) => {
                    log::debug!(
                        "{}/{}: risk {} ({}) from {} factor(s)",
                        disease.fluid,
                        disease.name,
                        prediction.risk_value,
                        prediction.risk_level,
                        prediction.factors.len()
                    );
                    predictions.push(disease.name.clone(), prediction);
                }
                None => log::debug!(
                    "{}/{}: no relevant biomarkers supplied",
                    disease.fluid,
                    disease.name
                ),
            }
        }
        predictions
    }
}

fn score_disease(disease: &DiseaseRules, readings: &Readings) -> Option<DiseasePrediction> {
    let mut total: u32 = 0;
    let mut factors = Vec::new();
    for rule in &disease.rules {
        let Some(value) = readings.get(&rule.biomarker) else {
            continue;
        };
        let classification = rule.classify(value);
        let contribution = rule.contribution(classification);
        log::trace!(
            "{}: {} = {value} -> {classification:?} (+{contribution})",
            disease.name,
            rule.biomarker
        );
        total = total.saturating_add(contribution);
        factors.push(factor(disease.fluid, rule, value, classification));
    }
    if factors.is_empty() {
        return None;
    }

    let risk_value = total.min(u32::from(MAX_RISK)) as u8;
    let risk_level = RiskLevel::from_score(risk_value);
    Some(DiseasePrediction {
        risk_level,
        risk_value,
        factors,
        recommendation: disease
            .recommendations
            .for_tier(risk_level.tier())
            .to_string(),
    })
}

fn factor(fluid: FluidType, rule: &RangeRule, value: f64, classification: Classification) -> Factor {
    let (label, reading) = match fluid.biomarker(&rule.biomarker) {
        Some(spec) => (spec.label, spec.format_value(value)),
        None => (rule.biomarker.as_str(), value.to_string()),
    };
    let (kind, qualifier) = match classification {
        Classification::Normal => (FactorType::Positive, "Normal"),
        Classification::Mild(Side::Above) => (FactorType::Warning, "Elevated"),
        Classification::Mild(Side::Below) => (FactorType::Warning, "Low"),
        Classification::Severe(Side::Above) => (FactorType::Negative, "Markedly elevated"),
        Classification::Severe(Side::Below) => (FactorType::Negative, "Markedly low"),
    };
    let text = rule
        .text
        .render(classification, &reading)
        .unwrap_or_else(|| format!("{qualifier} {label} ({reading})"));
    Factor {
        kind,
        text,
        biomarker: rule.biomarker.clone(),
    }
}

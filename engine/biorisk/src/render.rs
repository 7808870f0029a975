//! Plain-text renderings for the terminal.

use std::fmt::Write as _;

use biorisk_eval::{FactorType, Predictions, MAX_RISK};
use biorisk_panel::FluidType;
use biorisk_rules::{DiseaseRules, RuleTable};

const GAUGE_WIDTH: usize = 20;

/// `[#####...............]` scaled to [`MAX_RISK`].
pub fn gauge(risk_value: u8) -> String {
    let filled = usize::from(risk_value.min(MAX_RISK)) * GAUGE_WIDTH / usize::from(MAX_RISK);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}

fn marker(kind: FactorType) -> char {
    match kind {
        FactorType::Positive => '+',
        FactorType::Warning => '!',
        FactorType::Negative => 'x',
    }
}

pub fn predictions_report(table: &RuleTable, fluid: FluidType, predictions: &Predictions) -> String {
    let mut out = String::new();
    if predictions.is_empty() {
        let _ = writeln!(out, "{fluid}: no assessable biomarkers supplied");
        return out;
    }
    let _ = writeln!(out, "{fluid}: {} disease(s) assessed", predictions.len());
    for (name, prediction) in predictions.iter() {
        let title = table
            .disease(fluid, name)
            .map_or(name, |d| d.display_name.as_str());
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{title:<24} {} {:>3}/{MAX_RISK}  {}",
            gauge(prediction.risk_value),
            prediction.risk_value,
            prediction.risk_level
        );
        for factor in &prediction.factors {
            let _ = writeln!(out, "  {} {}", marker(factor.kind), factor.text);
        }
        let _ = writeln!(out, "  Recommendation: {}", prediction.recommendation);
    }
    out
}

pub fn panel_listing(fluids: &[FluidType]) -> String {
    let mut out = String::new();
    for (i, fluid) in fluids.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{fluid}");
        for spec in fluid.biomarkers() {
            let unit = if spec.unit.is_empty() { "-" } else { spec.unit };
            let _ = writeln!(
                out,
                "  {:<18} {:<26} {:<8} {}..{}",
                spec.name, spec.label, unit, spec.min, spec.max
            );
        }
    }
    out
}

fn disease_block(out: &mut String, disease: &DiseaseRules) {
    let _ = writeln!(out, "{}/{}  {}", disease.fluid, disease.name, disease.display_name);
    if !disease.description.is_empty() {
        let _ = writeln!(out, "  {}", disease.description);
    }
    for rule in &disease.rules {
        let _ = write!(
            out,
            "  - {:<18} {:<17} normal {}",
            rule.biomarker, rule.direction.to_string(), rule.normal
        );
        let mut severe = Vec::new();
        let (at_or_above, at_or_below) = if rule.severe_inclusive {
            (">=", "<=")
        } else {
            (">", "<")
        };
        if let Some(high) = rule.severe.high {
            severe.push(format!("{at_or_above} {high}"));
        }
        if let Some(low) = rule.severe.low {
            severe.push(format!("{at_or_below} {low}"));
        }
        let weights = match rule.mild_weight_below {
            Some(below) => format!("+{} above, +{below} below", rule.mild_weight),
            None => format!("+{}", rule.mild_weight),
        };
        if severe.is_empty() {
            let _ = writeln!(out, "  ({weights})");
        } else {
            let _ = writeln!(
                out,
                "  severe {}  ({weights}/+{})",
                severe.join(", "),
                rule.severe_weight
            );
        }
    }
}

pub fn rules_listing(table: &RuleTable, fluid: Option<FluidType>) -> String {
    let mut out = String::new();
    let diseases = table
        .diseases()
        .iter()
        .filter(|d| fluid.map_or(true, |f| d.fluid == f));
    for (i, disease) in diseases.enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        disease_block(&mut out, disease);
    }
    out
}

use std::io::Write;

use biorisk_panel::FluidType;
use biorisk_rules::{Classification, ConfigurationError, Direction, RuleTable, Side};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const RECOMMENDATIONS: &str = r#"
[disease.recommendations]
routine = "routine"
follow_up = "follow up"
urgent = "urgent"
"#;

fn table_with_rule(fluid: &str, rule: &str) -> String {
    format!(
        "[[disease]]\nfluid = \"{fluid}\"\nname = \"demo\"\ndisplay_name = \"Demo\"\n{RECOMMENDATIONS}\n[[disease.rule]]\n{rule}\n"
    )
}

#[test]
fn minimal_table_loads() {
    init_logger();
    let text = table_with_rule(
        "blood",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { low = 70.0, high = 99.0 }
severe = { high = 126.0 }
mild_weight = 30
severe_weight = 60"#,
    );
    let table = RuleTable::from_toml_str(&text).unwrap();
    let disease = table.disease(FluidType::Blood, "demo").unwrap();
    assert_eq!(disease.rules.len(), 1);
    assert_eq!(disease.rules[0].direction, Direction::HigherIsWorse);
    assert_eq!(disease.rules[0].severe.high, Some(126.0));
    assert!(table.rules_for(FluidType::Urine).next().is_none());
}

#[test]
fn biomarker_from_another_panel_is_fatal() {
    init_logger();
    let text = table_with_rule(
        "saliva",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30"#,
    );
    match RuleTable::from_toml_str(&text) {
        Err(ConfigurationError::ForeignBiomarker {
            fluid, biomarker, ..
        }) => {
            assert_eq!(fluid, FluidType::Saliva);
            assert_eq!(biomarker, "glucose");
        }
        other => panic!("expected ForeignBiomarker, got {other:?}"),
    }
}

#[test]
fn unknown_fluid_tag_is_fatal() {
    let text = table_with_rule(
        "sweat",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30"#,
    );
    let err = RuleTable::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnknownFluid { .. }));
    assert!(err.to_string().contains("demo"));
}

#[test]
fn inconsistent_rule_is_fatal() {
    let text = table_with_rule(
        "blood",
        r#"biomarker = "hdl"
direction = "lower-is-worse"
normal = { low = 60.0 }
severe = { low = 70.0 }
mild_weight = 15
severe_weight = 30"#,
    );
    let err = RuleTable::from_toml_str(&text).unwrap_err();
    match &err {
        ConfigurationError::InvalidRule { biomarker, .. } => assert_eq!(biomarker, "hdl"),
        other => panic!("expected InvalidRule, got {other:?}"),
    }
}

#[test]
fn duplicate_rule_and_disease_are_fatal() {
    let rule = r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30"#;
    let doubled_rule = table_with_rule("blood", &format!("{rule}\n\n[[disease.rule]]\n{rule}"));
    assert!(matches!(
        RuleTable::from_toml_str(&doubled_rule),
        Err(ConfigurationError::DuplicateRule { .. })
    ));

    let single = table_with_rule("blood", rule);
    let doubled_disease = format!("{single}\n{single}");
    assert!(matches!(
        RuleTable::from_toml_str(&doubled_disease),
        Err(ConfigurationError::DuplicateDisease { .. })
    ));
}

#[test]
fn disease_without_rules_is_fatal() {
    let text = format!(
        "[[disease]]\nfluid = \"csf\"\nname = \"empty\"\ndisplay_name = \"Empty\"\n{RECOMMENDATIONS}"
    );
    assert!(matches!(
        RuleTable::from_toml_str(&text),
        Err(ConfigurationError::EmptyDisease { .. })
    ));
}

#[test]
fn unknown_keys_fail_to_parse() {
    let text = table_with_rule(
        "blood",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30
weight = 4"#,
    );
    assert!(matches!(
        RuleTable::from_toml_str(&text),
        Err(ConfigurationError::Parse(_))
    ));
}

#[test]
fn table_loads_from_a_file() {
    init_logger();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(biorisk_rules::BUILTIN_RULES.as_bytes())
        .unwrap();
    let table = RuleTable::from_path(file.path()).unwrap();
    assert_eq!(table, RuleTable::builtin().unwrap());
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = RuleTable::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigurationError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn builtin_rules_only_use_recognised_biomarkers() {
    let table = RuleTable::builtin().unwrap();
    for disease in table.diseases() {
        for rule in &disease.rules {
            assert!(
                disease.fluid.recognizes(&rule.biomarker),
                "{} / {}",
                disease.name,
                rule.biomarker
            );
        }
    }
}

#[test]
fn strict_cutoffs_side_weights_and_texts_load() {
    init_logger();
    let text = table_with_rule(
        "urine",
        r#"biomarker = "specificGravity"
direction = "outside-is-worse"
normal = { low = 1.005, high = 1.030 }
mild_weight = 15
mild_weight_below = 0

[disease.rule.text]
normal = "In range ({value})"
mild_below = "Dilute urine (SG: {value})"

[[disease.rule]]
biomarker = "urineGlucose"
direction = "higher-is-worse"
normal = { low = 0.0, high = 0.0 }
severe = { high = 50.0 }
severe_inclusive = false
mild_weight = 30
severe_weight = 60"#,
    );
    let table = RuleTable::from_toml_str(&text).unwrap();
    let disease = table.disease(FluidType::Urine, "demo").unwrap();

    let gravity = &disease.rules[0];
    assert_eq!(gravity.mild_weight_below, Some(0));
    assert!(gravity.severe_inclusive);
    assert_eq!(
        gravity.text.render(Classification::Mild(Side::Below), "1.001").as_deref(),
        Some("Dilute urine (SG: 1.001)")
    );
    assert_eq!(gravity.text.template(Classification::Mild(Side::Above)), None);

    let glucose = &disease.rules[1];
    assert!(!glucose.severe_inclusive);
    assert_eq!(glucose.classify(50.0), Classification::Mild(Side::Above));
    assert!(glucose.text.is_empty());
}

#[test]
fn low_side_weight_on_one_sided_rule_is_fatal() {
    let text = table_with_rule(
        "blood",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30
mild_weight_below = 10"#,
    );
    let err = RuleTable::from_toml_str(&text).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidRule { .. }));
    assert!(err.to_string().contains("mild_weight_below"));
}

#[test]
fn unknown_factor_text_key_is_a_parse_error() {
    let text = table_with_rule(
        "blood",
        r#"biomarker = "glucose"
direction = "higher-is-worse"
normal = { high = 99.0 }
mild_weight = 30

[disease.rule.text]
elevated = "Elevated ({value})""#,
    );
    assert!(matches!(
        RuleTable::from_toml_str(&text),
        Err(ConfigurationError::Parse(_))
    ));
}

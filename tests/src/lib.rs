//! Shared fixtures for the workspace integration tests.

use std::collections::BTreeMap;
use std::sync::Once;

use serde_json::Value;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Decodes a JSON object into the raw reading map the evaluator accepts.
pub fn readings(json: Value) -> BTreeMap<String, Option<f64>> {
    serde_json::from_value(json).unwrap_or_else(|e| panic!("bad readings fixture: {e}"))
}

/// One representative request per fluid, as a client would send it.
pub fn sample_requests() -> Vec<(&'static str, Value)> {
    vec![
        (
            "blood",
            serde_json::json!({
                "glucose": 105, "hba1c": 5.9, "triglycerides": 160,
                "totalCholesterol": 215, "ldl": 135, "hdl": 42, "crp": 2.4, "homocysteine": null
            }),
        ),
        (
            "saliva",
            serde_json::json!({"il6": 4.5, "tnfAlpha": 18, "cyfra21": 2.1, "mmp9": 80, "cd44": 150}),
        ),
        (
            "urine",
            serde_json::json!({"albumin": 20, "acr": 25, "protein": 120, "urineGlucose": 0, "specificGravity": 1.02}),
        ),
        (
            "csf",
            serde_json::json!({"abeta42": 700, "totalTau": 250, "pTau": 40, "csfGlucose": 60, "cellCount": 2}),
        ),
    ]
}

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use biorisk_panel::{FluidType, Readings};
use serde::Serialize;

use crate::prediction::Predictions;

/// Input and output of one evaluation, shaped for durable storage.
///
/// The engine never stores these itself; callers decide where they go.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub fluid_type: FluidType,
    pub biomarkers: BTreeMap<String, f64>,
    pub predictions: Predictions,
    /// Epoch milliseconds, UTC.
    pub created_at_ms: i64,
}

impl AssessmentRecord {
    pub fn new(
        user_id: Option<String>,
        readings: &Readings,
        predictions: Predictions,
        created_at_ms: i64,
    ) -> Self {
        AssessmentRecord {
            user_id,
            fluid_type: readings.fluid(),
            biomarkers: readings
                .iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            predictions,
            created_at_ms,
        }
    }

    /// Stamps the record with the current wall-clock time.
    pub fn now(user_id: Option<String>, readings: &Readings, predictions: Predictions) -> Self {
        let created_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self::new(user_id, readings, predictions, created_at_ms)
    }

    /// Single-line JSON, suitable for appending to an NDJSON history file.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

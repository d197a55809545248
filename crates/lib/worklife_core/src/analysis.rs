//! Analysis Record domain types.
//!
//! The pipeline hands records around as raw JSON mappings so that parsed model
//! output passes through untouched. The typed structs here describe the
//! expected shape, build the fallback record, and back the optional shape
//! check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

pub const FALLBACK_SUMMARY: &str = "We could not parse your routine cleanly.";
pub const FALLBACK_SIGNAL: &str = "Malformed JSON from model";
pub const FALLBACK_ADVICE: &str =
    "Please describe your work hours, sleep schedule, breaks, and stress level more clearly.";

/// Severity scale shared by `risk_level` and recommendation `priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of advice attached to an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub advice: String,
    pub priority: Level,
}

/// Structured work-life balance assessment produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub balanced: bool,
    pub risk_level: Level,
    pub summary: String,
    pub signals: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisRecord {
    /// The fixed record substituted when model output cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            balanced: false,
            risk_level: Level::Medium,
            summary: FALLBACK_SUMMARY.to_string(),
            signals: vec![FALLBACK_SIGNAL.to_string()],
            recommendations: vec![Recommendation {
                category: "general".to_string(),
                advice: FALLBACK_ADVICE.to_string(),
                priority: Level::Medium,
            }],
        }
    }
}

/// The fallback record as a JSON mapping.
pub fn fallback_map() -> Map<String, Value> {
    let value = json!({
        "balanced": false,
        "risk_level": "medium",
        "summary": FALLBACK_SUMMARY,
        "signals": [FALLBACK_SIGNAL],
        "recommendations": [
            {
                "category": "general",
                "advice": FALLBACK_ADVICE,
                "priority": "medium"
            }
        ]
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// A parsed mapping that does not have the Analysis Record shape.
#[derive(Debug, Error)]
#[error("Analysis record shape mismatch: {0}")]
pub struct ShapeError(#[from] serde_json::Error);

/// Typed view of a mapping, failing on missing fields or wrong types.
///
/// Extra keys are tolerated.
pub fn check_shape(map: &Map<String, Value>) -> Result<AnalysisRecord, ShapeError> {
    Ok(serde_json::from_value(Value::Object(map.clone()))?)
}

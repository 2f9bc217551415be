use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::document_type::DocumentType;

pub const FAILED_SUMMARY: &str = "Failed to analyze document.";
pub const RAW_OUTPUT_KEY: &str = "analysis_output";

/// Which response contract the analysis prompt asks the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisShape {
    #[default]
    KeyPoints,
    ExtractedData,
}

/// Backend-defined structured summary. Always a non-empty JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    /// Wraps a backend mapping, filling in `document_type` if the backend left it out.
    pub fn from_map(mut fields: Map<String, Value>, hint: DocumentType, shape: AnalysisShape) -> Self {
        if fields.is_empty() {
            return Self::failed(hint, shape);
        }
        fields
            .entry("document_type")
            .or_insert_with(|| Value::String(hint.as_str().to_string()));
        Self(fields)
    }

    pub fn failed(hint: DocumentType, shape: AnalysisShape) -> Self {
        Self(skeleton(hint, FAILED_SUMMARY.to_string(), shape))
    }

    /// Backend returned valid JSON that was not an object.
    pub fn wrap_non_mapping(value: Value, hint: DocumentType, shape: AnalysisShape) -> Self {
        let summary = match &value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let mut fields = skeleton(hint, summary, shape);
        fields.insert(RAW_OUTPUT_KEY.to_string(), value);
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn document_type(&self) -> Option<&str> {
        self.0.get("document_type").and_then(Value::as_str)
    }

    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }

    pub fn is_failure(&self) -> bool {
        self.summary() == Some(FAILED_SUMMARY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn skeleton(hint: DocumentType, summary: String, shape: AnalysisShape) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "document_type".to_string(),
        Value::String(hint.as_str().to_string()),
    );
    fields.insert("summary".to_string(), Value::String(summary));
    match shape {
        AnalysisShape::KeyPoints => {
            fields.insert("key_points".to_string(), Value::Array(Vec::new()));
            fields.insert("deadlines".to_string(), Value::Array(Vec::new()));
        }
        AnalysisShape::ExtractedData => {
            fields.insert("extracted_data".to_string(), Value::Object(Map::new()));
        }
    }
    fields
}

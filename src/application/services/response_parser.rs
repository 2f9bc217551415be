use serde_json::Value;

use crate::domain::{AnalysisResult, AnalysisShape, DocumentType};

/// Total over any backend output: unknown labels, malformed JSON and
/// non-object payloads all resolve to `GeneralDocument`.
pub fn parse_classification(raw: &str) -> DocumentType {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        tracing::warn!("Empty classification response");
        return DocumentType::GeneralDocument;
    }

    let value: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, raw_len = raw.len(), "Classification response is not JSON");
            return DocumentType::GeneralDocument;
        }
    };

    let Value::Object(map) = &value else {
        tracing::warn!("Classification response is not a JSON object");
        return DocumentType::GeneralDocument;
    };
    let label = map.get("document_type").and_then(Value::as_str);

    match label.and_then(DocumentType::from_label) {
        Some(doc_type) => doc_type,
        None => {
            tracing::warn!(label = ?label, "Unexpected classification format");
            DocumentType::GeneralDocument
        }
    }
}

/// Total over any backend output: always yields a non-empty mapping.
pub fn parse_analysis(raw: &str, hint: DocumentType, shape: AnalysisShape) -> AnalysisResult {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        tracing::warn!("Empty analysis response");
        return AnalysisResult::failed(hint, shape);
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => {
            tracing::info!(keys = map.len(), "Parsed analysis response");
            AnalysisResult::from_map(map, hint, shape)
        }
        Ok(other) => {
            tracing::warn!("Analysis response is not a JSON object, wrapping it");
            AnalysisResult::wrap_non_mapping(other, hint, shape)
        }
        Err(e) => {
            tracing::warn!(error = %e, raw_len = raw.len(), "Analysis response is not JSON");
            AnalysisResult::failed(hint, shape)
        }
    }
}

/// Models occasionally wrap JSON-mode output in a markdown fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_suffix("```").unwrap_or(rest);
    let body = body.trim_start();
    body.strip_prefix("json").unwrap_or(body).trim()
}

use dossier::domain::{AnalysisResult, AnalysisShape, DocumentType, FAILED_SUMMARY, RAW_OUTPUT_KEY};
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

#[test]
fn given_key_points_shape_when_failed_then_contains_empty_arrays_and_hint() {
    let result = AnalysisResult::failed(DocumentType::Invoice, AnalysisShape::KeyPoints);

    assert_eq!(result.document_type(), Some("Invoice"));
    assert_eq!(result.summary(), Some(FAILED_SUMMARY));
    assert_eq!(result.get("key_points"), Some(&json!([])));
    assert_eq!(result.get("deadlines"), Some(&json!([])));
    assert!(result.is_failure());
}

#[test]
fn given_extracted_data_shape_when_failed_then_contains_empty_object() {
    let result = AnalysisResult::failed(DocumentType::Contract, AnalysisShape::ExtractedData);

    assert_eq!(result.get("extracted_data"), Some(&json!({})));
    assert_eq!(result.get("key_points"), None);
    assert_eq!(result.document_type(), Some("Contract"));
}

#[test]
fn given_mapping_without_document_type_when_wrapped_then_hint_is_filled_in() {
    let fields = object(json!({ "summary": "Quarterly figures" }));

    let result = AnalysisResult::from_map(fields, DocumentType::BalanceSheet, AnalysisShape::KeyPoints);

    assert_eq!(result.document_type(), Some("BalanceSheet"));
    assert_eq!(result.summary(), Some("Quarterly figures"));
    assert!(!result.is_failure());
}

#[test]
fn given_mapping_with_document_type_when_wrapped_then_backend_value_is_kept() {
    let fields = object(json!({ "document_type": "Invoice", "total": 12 }));

    let result = AnalysisResult::from_map(fields, DocumentType::Contract, AnalysisShape::KeyPoints);

    assert_eq!(result.document_type(), Some("Invoice"));
    assert_eq!(result.get("total"), Some(&json!(12)));
}

#[test]
fn given_empty_mapping_when_wrapped_then_degrades_to_failure_shape() {
    let result = AnalysisResult::from_map(Map::new(), DocumentType::Invoice, AnalysisShape::KeyPoints);

    assert!(result.is_failure());
    assert!(!result.is_empty());
}

#[test]
fn given_bare_string_when_wrapping_non_mapping_then_summary_holds_string() {
    let result = AnalysisResult::wrap_non_mapping(
        json!("just a sentence"),
        DocumentType::Invoice,
        AnalysisShape::KeyPoints,
    );

    assert_eq!(result.summary(), Some("just a sentence"));
    assert_eq!(result.document_type(), Some("Invoice"));
    assert_eq!(result.get(RAW_OUTPUT_KEY), Some(&json!("just a sentence")));
}

#[test]
fn given_array_when_wrapping_non_mapping_then_summary_is_json_rendering() {
    let result = AnalysisResult::wrap_non_mapping(
        json!([1, 2]),
        DocumentType::GeneralDocument,
        AnalysisShape::KeyPoints,
    );

    assert_eq!(result.summary(), Some("[1,2]"));
    assert_eq!(result.get(RAW_OUTPUT_KEY), Some(&json!([1, 2])));
}

#[test]
fn given_analysis_result_when_serialized_then_is_a_plain_object() {
    let result = AnalysisResult::failed(DocumentType::Invoice, AnalysisShape::KeyPoints);

    let value = serde_json::to_value(&result).unwrap();

    assert!(value.is_object());
    assert_eq!(value["document_type"], json!("Invoice"));
}

use dossier::application::ports::FileLoaderError;
use dossier::domain::ExtractorOutcome;

#[test]
fn given_text_when_classifying_result_then_is_success() {
    let outcome = ExtractorOutcome::from_result(Ok("hello".to_string()));

    assert!(outcome.is_success());
    assert_eq!(outcome.into_text(), "hello");
}

#[test]
fn given_whitespace_only_text_when_classifying_result_then_is_empty_result() {
    let outcome = ExtractorOutcome::from_result(Ok(" \n\t ".to_string()));

    assert_eq!(outcome, ExtractorOutcome::EmptyResult);
}

#[test]
fn given_no_text_found_error_when_classifying_result_then_is_empty_result() {
    let outcome =
        ExtractorOutcome::from_result(Err(FileLoaderError::NoTextFound("scan.pdf".to_string())));

    assert_eq!(outcome, ExtractorOutcome::EmptyResult);
}

#[test]
fn given_extraction_error_when_classifying_result_then_is_failure_without_text() {
    let outcome = ExtractorOutcome::from_result(Err(FileLoaderError::ExtractionFailed(
        "bad xref".to_string(),
    )));

    assert!(matches!(outcome, ExtractorOutcome::Failure(ref msg) if msg.contains("bad xref")));
    assert_eq!(outcome.into_text(), "");
}

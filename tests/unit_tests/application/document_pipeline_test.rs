use std::sync::Arc;

use dossier::application::ports::{FileLoader, ResponseFormat};
use dossier::application::services::{
    DocumentIntelligenceService, DocumentPipeline, ExtractionChain, PipelineError,
};
use dossier::domain::{DocumentType, FileKind, UploadedFile};

use crate::helpers::{CountingLoader, LoaderReply, Reply, ScriptedLlmClient};

fn pipeline(
    primary: Arc<CountingLoader>,
    fallback: Arc<CountingLoader>,
    client: &Arc<ScriptedLlmClient>,
) -> DocumentPipeline<ScriptedLlmClient> {
    let primary: Arc<dyn FileLoader> = primary;
    let fallback: Arc<dyn FileLoader> = fallback;
    let chain = Arc::new(ExtractionChain::new(
        vec![(FileKind::Pdf, primary)],
        fallback,
    ));
    let intelligence = Arc::new(DocumentIntelligenceService::new(Arc::clone(client)));
    DocumentPipeline::new(chain, intelligence)
}

#[tokio::test]
async fn given_text_pdf_when_processing_then_classifies_then_analyzes_extracted_text() {
    let client = Arc::new(ScriptedLlmClient::new(
        vec![Reply::text(r#"{"document_type": "Invoice"}"#)],
        Reply::text(r#"{"summary": "Consulting invoice", "key_points": [], "deadlines": []}"#),
    ));
    let pipeline = pipeline(
        Arc::new(CountingLoader::text("Invoice #42")),
        Arc::new(CountingLoader::text("unused")),
        &client,
    );

    let report = pipeline
        .process(UploadedFile::new("invoice.pdf", b"%PDF".to_vec(), None))
        .await
        .unwrap();

    assert_eq!(report.filename, "invoice.pdf");
    assert_eq!(report.document_type, DocumentType::Invoice);
    assert_eq!(report.analysis.summary(), Some("Consulting invoice"));
    assert_eq!(report.analysis.document_type(), Some("Invoice"));

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].user_text().contains("Invoice #42"));
    assert!(requests[1].user_text().contains("Invoice"));
    assert!(requests.iter().all(|r| r.response_format == ResponseFormat::Json));
}

#[tokio::test]
async fn given_nothing_extractable_when_processing_then_returns_no_text_extracted() {
    let client = Arc::new(ScriptedLlmClient::replying("unused"));
    let fallback = Arc::new(CountingLoader::new(LoaderReply::Empty));
    let pipeline = pipeline(
        Arc::new(CountingLoader::new(LoaderReply::Empty)),
        Arc::clone(&fallback),
        &client,
    );

    let result = pipeline
        .process(UploadedFile::new("blank.pdf", b"%PDF".to_vec(), None))
        .await;

    assert!(matches!(result, Err(PipelineError::NoTextExtracted(ref name)) if name == "blank.pdf"));
    assert_eq!(fallback.calls(), 1);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_unsupported_extension_when_processing_then_rejects_before_extraction() {
    let client = Arc::new(ScriptedLlmClient::replying("unused"));
    let primary = Arc::new(CountingLoader::text("unused"));
    let pipeline = pipeline(
        Arc::clone(&primary),
        Arc::new(CountingLoader::text("unused")),
        &client,
    );

    let result = pipeline
        .process(UploadedFile::new("archive.zip", vec![1, 2, 3], None))
        .await;

    match result {
        Err(PipelineError::UnsupportedFileType { filename, allowed }) => {
            assert_eq!(filename, "archive.zip");
            assert!(allowed.contains(".pdf"));
            assert!(allowed.contains(".csv"));
        }
        other => panic!("expected UnsupportedFileType, got {other:?}"),
    }
    assert_eq!(primary.calls(), 0);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_backend_down_when_processing_then_report_degrades_to_defaults() {
    let client = Arc::new(ScriptedLlmClient::failing());
    let pipeline = pipeline(
        Arc::new(CountingLoader::text("Some contract")),
        Arc::new(CountingLoader::text("unused")),
        &client,
    );

    let report = pipeline
        .process(UploadedFile::new("contract.pdf", b"%PDF".to_vec(), None))
        .await
        .unwrap();

    assert_eq!(report.document_type, DocumentType::GeneralDocument);
    assert!(report.analysis.is_failure());
    assert_eq!(client.calls(), 6);
}

#[tokio::test]
async fn given_report_when_serialized_then_exposes_type_and_analysis() {
    let client = Arc::new(ScriptedLlmClient::new(
        vec![Reply::text(r#"{"document_type": "Contract"}"#)],
        Reply::text(r#"{"summary": "Lease"}"#),
    ));
    let pipeline = pipeline(
        Arc::new(CountingLoader::text("Lease agreement")),
        Arc::new(CountingLoader::text("unused")),
        &client,
    );

    let report = pipeline
        .process(UploadedFile::new("lease.pdf", b"%PDF".to_vec(), None))
        .await
        .unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["document_type"], "Contract");
    assert_eq!(value["analysis"]["summary"], "Lease");
    assert_eq!(value["filename"], "lease.pdf");
}

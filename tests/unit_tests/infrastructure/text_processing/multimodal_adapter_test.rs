use std::sync::Arc;

use dossier::application::ports::{ContentPart, FileLoader, FileLoaderError};
use dossier::application::services::DocumentIntelligenceService;
use dossier::domain::UploadedFile;
use dossier::infrastructure::text_processing::MultimodalAdapter;

use crate::helpers::ScriptedLlmClient;

fn adapter(client: &Arc<ScriptedLlmClient>) -> MultimodalAdapter<ScriptedLlmClient> {
    MultimodalAdapter::new(Arc::new(DocumentIntelligenceService::new(Arc::clone(
        client,
    ))))
}

#[tokio::test]
async fn given_backend_transcribes_file_when_extracting_then_returns_text() {
    let client = Arc::new(ScriptedLlmClient::replying("Scanned page text"));
    let file = UploadedFile::new("scan.pdf", b"%PDF-1.4".to_vec(), None);

    let text = adapter(&client).extract_text(&file).await.unwrap();

    assert_eq!(text, "Scanned page text");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn given_declared_media_type_when_extracting_then_it_is_forwarded() {
    let client = Arc::new(ScriptedLlmClient::replying("text"));
    let file = UploadedFile::new(
        "ledger.xlsx",
        b"PK".to_vec(),
        Some("application/vnd.custom".to_string()),
    );

    adapter(&client).extract_text(&file).await.unwrap();

    assert!(matches!(
        &client.requests()[0].content[0],
        ContentPart::File { mime_type, .. } if mime_type == "application/vnd.custom"
    ));
}

#[tokio::test]
async fn given_backend_failure_when_extracting_then_returns_no_text_found() {
    let client = Arc::new(ScriptedLlmClient::failing());
    let file = UploadedFile::new("scan.pdf", b"%PDF-1.4".to_vec(), None);

    let result = adapter(&client).extract_text(&file).await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
    assert_eq!(client.calls(), 1);
}

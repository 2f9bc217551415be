use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use dossier::application::ports::{FileLoader, LlmClient};
use dossier::application::services::{DocumentIntelligenceService, DocumentPipeline};
use dossier::domain::UploadedFile;
use dossier::infrastructure::llm::LazyLlmClient;
use dossier::infrastructure::observability::{TracingConfig, init_tracing};
use dossier::infrastructure::text_processing::{ExtractorFactory, MultimodalAdapter};
use dossier::presentation::{Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    if let Err(e) = init_tracing(TracingConfig::from_settings(
        &settings.logging,
        environment.as_str(),
    )) {
        eprintln!("tracing already initialized: {e}");
    }

    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(
        args.next()
            .context("usage: dossier <path> [media-type]")?,
    );
    let declared_media_type = args.next();

    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let llm_client: Arc<dyn LlmClient> = Arc::new(LazyLlmClient::new(settings.llm.clone()));
    let intelligence = Arc::new(
        DocumentIntelligenceService::new(llm_client)
            .with_max_attempts(settings.intelligence.max_attempts)
            .with_classification_prefix_chars(settings.intelligence.classification_prefix_chars)
            .with_analysis_shape(settings.intelligence.analysis_shape),
    );
    let fallback: Arc<dyn FileLoader> = Arc::new(MultimodalAdapter::new(Arc::clone(&intelligence)));
    let chain = Arc::new(ExtractorFactory::create(&settings.extraction, fallback));
    let pipeline = DocumentPipeline::new(chain, intelligence);

    tracing::info!(file = %name, provider = ?settings.llm.provider, "Processing document");

    let report = pipeline
        .process(UploadedFile::new(name, bytes, declared_media_type))
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

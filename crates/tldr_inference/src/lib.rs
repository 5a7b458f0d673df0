use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tldr_core::{Error, InferenceClient, ModelSelector, Result, TargetLanguage, DEFAULT_SENTENCES_PER_CHUNK};

pub mod chunker;
pub mod client;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod translation;

pub use client::HuggingFaceClient;
pub use pipeline::SummarizationPipeline;
pub use session::SummarySession;
pub use translation::TranslationStep;

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub summarization_model: ModelSelector,
    pub translation_models: HashMap<TargetLanguage, ModelSelector>,
    pub sentences_per_chunk: usize,
    /// Transport timeout handed to the HTTP client. `None` keeps reqwest's default.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("summarization_model", &self.summarization_model)
            .field("translation_models", &self.translation_models)
            .field("sentences_per_chunk", &self.sentences_per_chunk)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: client::DEFAULT_BASE_URL.to_string(),
            summarization_model: models::default_summarization_model(),
            translation_models: models::default_translation_models(),
            sentences_per_chunk: DEFAULT_SENTENCES_PER_CHUNK,
            timeout: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.sentences_per_chunk == 0 {
            return Err(Error::Config("sentences per chunk must be at least 1".to_string()));
        }
        if self.summarization_model.as_str().trim().is_empty() {
            return Err(Error::Config("summarization model must not be empty".to_string()));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }
}

pub fn create_client(config: &Config) -> Result<Arc<dyn InferenceClient>> {
    let client = HuggingFaceClient::from_config(config)?;
    tracing::debug!("Created inference client {:?}", client);
    Ok(Arc::new(client))
}

/// Builds a session whose pipeline and translator share `client`.
pub fn create_session_with_client(config: &Config, client: Arc<dyn InferenceClient>) -> Result<SummarySession> {
    config.validate()?;
    let pipeline = SummarizationPipeline::new(client.clone(), config.summarization_model.clone())
        .with_sentences_per_chunk(config.sentences_per_chunk);
    let translator = TranslationStep::new(client, config.translation_models.clone());
    Ok(SummarySession::new(pipeline, translator))
}

pub fn create_session(config: &Config) -> Result<SummarySession> {
    config.validate()?;
    create_session_with_client(config, create_client(config)?)
}

pub mod prelude {
    pub use super::{create_client, create_session, Config};
    pub use super::{SummarizationPipeline, SummarySession, TranslationStep};
    pub use tldr_core::{ArticleText, Error, PresentationSink, Result, TargetLanguage};
}

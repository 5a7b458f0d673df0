use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Default number of sentences grouped into one chunk.
pub const DEFAULT_SENTENCES_PER_CHUNK: usize = 10;

/// The full extracted body of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleText(String);

impl ArticleText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for ArticleText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ArticleText {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for ArticleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sentence-aligned slice of an article, one unit of summarization work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
    pub sentence_count: usize,
}

/// Identifier of a hosted model, e.g. `sshleifer/distilbart-cnn-12-6`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSelector(String);

impl ModelSelector {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelSelector {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModelSelector {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    En,
    #[serde(alias = "zh")]
    Cn,
    Es,
    Fr,
    De,
    Ja,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::En,
        TargetLanguage::Cn,
        TargetLanguage::Es,
        TargetLanguage::Fr,
        TargetLanguage::De,
        TargetLanguage::Ja,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::En => "en",
            TargetLanguage::Cn => "cn",
            TargetLanguage::Es => "es",
            TargetLanguage::Fr => "fr",
            TargetLanguage::De => "de",
            TargetLanguage::Ja => "ja",
        }
    }

    /// Summaries are produced in English, so `En` never needs a translation call.
    pub fn is_identity(&self) -> bool {
        matches!(self, TargetLanguage::En)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(TargetLanguage::En),
            "cn" | "zh" => Ok(TargetLanguage::Cn),
            "es" => Ok(TargetLanguage::Es),
            "fr" => Ok(TargetLanguage::Fr),
            "de" => Ok(TargetLanguage::De),
            "ja" => Ok(TargetLanguage::Ja),
            other => Err(Error::Config(format!("Unsupported language code: {}", other))),
        }
    }
}

/// Which kind of hosted model a request targets. Decides the field read from
/// a successful response and the diagnostic used when the body is unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceTask {
    Summarize,
    Translate,
}

impl InferenceTask {
    pub fn output_field(&self) -> &'static str {
        match self {
            InferenceTask::Summarize => "summary_text",
            InferenceTask::Translate => "translation_text",
        }
    }

    pub fn malformed_message(&self) -> &'static str {
        match self {
            InferenceTask::Summarize => "Unexpected response from Hugging Face API",
            InferenceTask::Translate => "Unexpected response from Hugging Face translation API",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Chunking,
    Summarizing { index: usize, total: usize },
    Combining,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Chunking => write!(f, "chunking"),
            PipelineState::Summarizing { index, total } => write!(f, "summarizing {}/{}", index, total),
            PipelineState::Combining => write!(f, "combining"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed => write!(f, "failed"),
        }
    }
}

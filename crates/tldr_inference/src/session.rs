use tldr_core::{ArticleText, Error, PresentationSink, Result, TargetLanguage};

use crate::pipeline::SummarizationPipeline;
use crate::translation::{clean_summary_formatting, TranslationStep};

/// Articles shorter than this (in characters) are not worth summarizing.
pub const MIN_ARTICLE_CHARS: usize = 50;

pub const NO_CONTENT_MESSAGE: &str = "No article content to summarize.";
pub const SUMMARIZING_MESSAGE: &str = "Summarizing with AI...";
pub const TRANSLATING_MESSAGE: &str = "Translating summary...";

/// The English summary of the most recently summarized article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSummary {
    pub article: ArticleText,
    pub english_summary: String,
}

/// One user's summarization session: the pipeline, the translator and a
/// single-slot cache keyed by the exact article text. A new article replaces
/// the slot; nothing else evicts it except [`invalidate`](Self::invalidate).
#[derive(Debug)]
pub struct SummarySession {
    pipeline: SummarizationPipeline,
    translator: TranslationStep,
    cache: Option<CachedSummary>,
}

impl SummarySession {
    pub fn new(pipeline: SummarizationPipeline, translator: TranslationStep) -> Self {
        Self {
            pipeline,
            translator,
            cache: None,
        }
    }

    pub fn pipeline(&self) -> &SummarizationPipeline {
        &self.pipeline
    }

    pub fn cached_summary(&self) -> Option<&CachedSummary> {
        self.cache.as_ref()
    }

    /// Forgets the cached summary so the next request runs the pipeline again.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    async fn english_summary(&mut self, text: &ArticleText, sink: &dyn PresentationSink) -> Result<String> {
        if let Some(cached) = self.cache.as_ref().filter(|c| &c.article == text) {
            tracing::info!("♻️ Reusing cached summary");
            return Ok(cached.english_summary.clone());
        }

        sink.show_progress(SUMMARIZING_MESSAGE);
        let summary = match self.pipeline.summarize_long(text, sink).await {
            Ok(summary) => clean_summary_formatting(&summary),
            Err(e) => {
                sink.show_error(&format!("AI summarization failed: {}", e));
                return Err(e);
            }
        };

        self.cache = Some(CachedSummary {
            article: text.clone(),
            english_summary: summary.clone(),
        });
        Ok(summary)
    }

    /// Summarizes `text` and translates the summary into `language`.
    pub async fn summarize(
        &mut self,
        text: &ArticleText,
        language: TargetLanguage,
        sink: &dyn PresentationSink,
    ) -> Result<String> {
        if text.char_count() < MIN_ARTICLE_CHARS {
            sink.show_error(NO_CONTENT_MESSAGE);
            return Err(Error::Precondition(NO_CONTENT_MESSAGE.to_string()));
        }

        let english = self.english_summary(text, sink).await?;

        let result = if language.is_identity() {
            english
        } else {
            sink.show_progress(TRANSLATING_MESSAGE);
            self.translator.translate_or_fallback(&english, language).await
        };

        sink.show_result(&result);
        Ok(result)
    }
}

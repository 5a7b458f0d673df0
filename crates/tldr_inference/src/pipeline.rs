use std::fmt;
use std::sync::Arc;

use tldr_core::{
    ArticleText, Error, InferenceClient, InferenceTask, ModelSelector, PipelineState,
    PresentationSink, Result, DEFAULT_SENTENCES_PER_CHUNK,
};

use crate::chunker::chunk_text;

/// Placeholder for a chunk whose summarization call failed.
pub const CHUNK_ERROR_SENTINEL: &str = "[Error summarizing chunk]";

pub const COMBINING_MESSAGE: &str = "Summarizing combined summary...";

pub fn chunk_progress_message(index: usize, total: usize) -> String {
    format!("Summarizing chunk {} of {}...", index, total)
}

/// Summarizes arbitrarily long text by summarizing sentence-aligned chunks one
/// after another and, when there was more than one, summarizing their
/// concatenation once more.
pub struct SummarizationPipeline {
    client: Arc<dyn InferenceClient>,
    model: ModelSelector,
    sentences_per_chunk: usize,
}

impl fmt::Debug for SummarizationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizationPipeline")
            .field("client", &self.client.name())
            .field("model", &self.model)
            .field("sentences_per_chunk", &self.sentences_per_chunk)
            .finish()
    }
}

impl SummarizationPipeline {
    pub fn new(client: Arc<dyn InferenceClient>, model: ModelSelector) -> Self {
        Self {
            client,
            model,
            sentences_per_chunk: DEFAULT_SENTENCES_PER_CHUNK,
        }
    }

    pub fn with_sentences_per_chunk(mut self, sentences_per_chunk: usize) -> Self {
        self.sentences_per_chunk = sentences_per_chunk.max(1);
        self
    }

    pub fn model(&self) -> &ModelSelector {
        &self.model
    }

    async fn summarize(&self, input: &str) -> Result<String> {
        self.client.infer(InferenceTask::Summarize, &self.model, input).await
    }

    /// Runs the chunked summarization.
    ///
    /// A failed chunk contributes [`CHUNK_ERROR_SENTINEL`] and the run carries
    /// on. A failed combine call falls back to the joined chunk summaries. The
    /// run only fails when no chunk could be summarized at all.
    pub async fn summarize_long(&self, text: &ArticleText, sink: &dyn PresentationSink) -> Result<String> {
        sink.on_state(&PipelineState::Chunking);
        let chunks = chunk_text(text.as_str(), self.sentences_per_chunk);
        let total = chunks.len();
        tracing::info!("📑 Split article into {} chunk(s) using {}", total, self.model);

        let mut summaries = Vec::with_capacity(total);
        let mut succeeded = 0usize;
        let mut last_error: Option<Error> = None;

        for chunk in &chunks {
            let position = chunk.index + 1;
            sink.on_state(&PipelineState::Summarizing { index: position, total });
            sink.show_progress(&chunk_progress_message(position, total));

            match self.summarize(&chunk.text).await {
                Ok(summary) => {
                    tracing::debug!("Chunk {}/{} summarized ({} sentences)", position, total, chunk.sentence_count);
                    succeeded += 1;
                    summaries.push(summary);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Chunk {}/{} failed: {}", position, total, e);
                    summaries.push(CHUNK_ERROR_SENTINEL.to_string());
                    last_error = Some(e);
                }
            }
        }

        if succeeded == 0 {
            sink.on_state(&PipelineState::Failed);
            return Err(last_error.unwrap_or_else(|| {
                Error::Precondition("Nothing to summarize".to_string())
            }));
        }

        let combined = summaries.join(" ");
        if total == 1 {
            sink.on_state(&PipelineState::Done);
            return Ok(combined);
        }

        sink.on_state(&PipelineState::Combining);
        sink.show_progress(COMBINING_MESSAGE);
        let result = match self.summarize(&combined).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("⚠️ Combine step failed, using joined chunk summaries: {}", e);
                combined
            }
        };

        sink.on_state(&PipelineState::Done);
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tldr_core::{Error, InferenceClient, InferenceTask, ModelSelector, Result};

    /// Replays scripted responses in order and records every call.
    #[derive(Default)]
    pub struct ScriptedClient {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: Mutex<Vec<(InferenceTask, String, String)>>,
    }

    impl ScriptedClient {
        pub fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<(InferenceTask, String, String)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InferenceClient for ScriptedClient {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn infer(&self, task: InferenceTask, model: &ModelSelector, input: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((task, model.to_string(), input.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::MalformedResponse("script exhausted".to_string())))
        }
    }

    pub fn ok(text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    pub fn remote(message: &str) -> Result<String> {
        Err(Error::Remote(message.to_string()))
    }
}

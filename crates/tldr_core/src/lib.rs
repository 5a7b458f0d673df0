pub mod error;
pub mod models;
pub mod sink;
pub mod source;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use models::InferenceClient;
pub use sink::{CollectingSink, PresentationSink, SinkEvent};
pub use source::{StaticTextSource, TextSource};
pub use types::{
    ArticleText, Chunk, InferenceTask, ModelSelector, PipelineState, TargetLanguage,
    DEFAULT_SENTENCES_PER_CHUNK,
};

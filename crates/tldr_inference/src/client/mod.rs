pub mod huggingface;

pub use huggingface::{HuggingFaceClient, DEFAULT_BASE_URL};

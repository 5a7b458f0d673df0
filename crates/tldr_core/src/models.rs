use async_trait::async_trait;
use crate::types::{InferenceTask, ModelSelector};
use crate::Result;

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one remote inference call and return the model's primary text output
    async fn infer(&self, task: InferenceTask, model: &ModelSelector, input: &str) -> Result<String>;
}

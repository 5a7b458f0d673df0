use async_trait::async_trait;
use crate::types::ArticleText;
use crate::Result;

#[async_trait]
pub trait TextSource: Send + Sync {
    /// Returns the current article text. Implementations may cache.
    async fn article_text(&self) -> Result<ArticleText>;
}

/// A source that always hands out the same text.
#[derive(Debug, Clone)]
pub struct StaticTextSource {
    text: ArticleText,
}

impl StaticTextSource {
    pub fn new(text: impl Into<ArticleText>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextSource for StaticTextSource {
    async fn article_text(&self) -> Result<ArticleText> {
        Ok(self.text.clone())
    }
}

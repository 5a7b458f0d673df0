use std::path::PathBuf;

use async_trait::async_trait;
use tldr_core::{ArticleText, Result, TextSource};
use tokio::io::AsyncReadExt;

/// Reads the article from a file on every request.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for FileSource {
    async fn article_text(&self) -> Result<ArticleText> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(ArticleText::from(text))
    }
}

/// Reads the article from standard input until EOF.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

#[async_trait]
impl TextSource for StdinSource {
    async fn article_text(&self) -> Result<ArticleText> {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(ArticleText::from(text))
    }
}

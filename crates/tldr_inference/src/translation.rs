use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tldr_core::{InferenceClient, InferenceTask, ModelSelector, Result, TargetLanguage};

pub const TRANSLATION_FAILED_PREFIX: &str = "Translation failed. Showing English summary.";

lazy_static! {
    static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([.,!?;:])").expect("valid punctuation regex");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
    static ref SPACE_AFTER_FULLWIDTH: Regex =
        Regex::new(r"([，。！？；：）”’])\s+").expect("valid full-width punctuation regex");
}

/// Drops whitespace in front of `, . ! ? ; :`, collapses whitespace runs to a
/// single space and trims both ends.
pub fn clean_summary_formatting(text: &str) -> String {
    let tightened = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    WHITESPACE_RUN.replace_all(&tightened, " ").trim().to_string()
}

/// Maps ASCII punctuation to full-width Chinese punctuation. Straight quotes
/// alternate between opening and closing forms. Full-width marks carry their
/// own spacing, so whitespace after them is dropped.
pub fn to_chinese_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut double_open = true;
    let mut single_open = true;

    for c in text.chars() {
        match c {
            ',' => out.push('，'),
            '.' => out.push('。'),
            '!' => out.push('！'),
            '?' => out.push('？'),
            ';' => out.push('；'),
            ':' => out.push('：'),
            '(' => out.push('（'),
            ')' => out.push('）'),
            '"' => {
                out.push(if double_open { '\u{201C}' } else { '\u{201D}' });
                double_open = !double_open;
            }
            '\'' => {
                out.push(if single_open { '\u{2018}' } else { '\u{2019}' });
                single_open = !single_open;
            }
            other => out.push(other),
        }
    }
    SPACE_AFTER_FULLWIDTH.replace_all(&out, "$1").into_owned()
}

/// Translates an English summary with a per-language model.
pub struct TranslationStep {
    client: Arc<dyn InferenceClient>,
    models: HashMap<TargetLanguage, ModelSelector>,
}

impl fmt::Debug for TranslationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationStep")
            .field("client", &self.client.name())
            .field("models", &self.models)
            .finish()
    }
}

impl TranslationStep {
    pub fn new(client: Arc<dyn InferenceClient>, models: HashMap<TargetLanguage, ModelSelector>) -> Self {
        Self { client, models }
    }

    pub fn model_for(&self, language: TargetLanguage) -> Option<&ModelSelector> {
        if language.is_identity() {
            return None;
        }
        self.models.get(&language)
    }

    /// `En` and languages without a configured model are returned unchanged
    /// without calling the service.
    pub async fn translate(&self, summary: &str, language: TargetLanguage) -> Result<String> {
        let Some(model) = self.model_for(language) else {
            return Ok(summary.to_string());
        };

        tracing::info!("🌐 Translating summary to {} with {}", language, model);
        let translated = self.client.infer(InferenceTask::Translate, model, summary).await?;
        let cleaned = clean_summary_formatting(&translated);

        Ok(match language {
            TargetLanguage::Cn => to_chinese_punctuation(&cleaned),
            _ => cleaned,
        })
    }

    /// Like [`translate`](Self::translate) but never loses the English text:
    /// on failure the English summary is returned behind a notice.
    pub async fn translate_or_fallback(&self, summary: &str, language: TargetLanguage) -> String {
        match self.translate(summary, language).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("⚠️ Translation to {} failed: {}", language, e);
                format!("{}\n{}", TRANSLATION_FAILED_PREFIX, summary)
            }
        }
    }
}

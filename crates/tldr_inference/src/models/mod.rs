use std::collections::HashMap;
use serde::Serialize;
use tldr_core::{ModelSelector, TargetLanguage};

pub const DEFAULT_SUMMARIZATION_MODEL: &str = "sshleifer/distilbart-cnn-12-6";

/// An entry of the summarization model catalog.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SUMMARIZATION_MODELS: &[ModelInfo] = &[
    ModelInfo { id: DEFAULT_SUMMARIZATION_MODEL, label: "DistilBART CNN (fast)" },
    ModelInfo { id: "facebook/bart-large-cnn", label: "BART Large CNN" },
    ModelInfo { id: "google/pegasus-xsum", label: "Pegasus XSum (very short)" },
    ModelInfo { id: "philschmid/bart-large-cnn-samsum", label: "BART Large CNN SAMSum" },
];

pub fn default_summarization_model() -> ModelSelector {
    ModelSelector::new(DEFAULT_SUMMARIZATION_MODEL)
}

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    SUMMARIZATION_MODELS.iter().find(|m| m.id == id)
}

/// Default English→X translation models.
pub fn default_translation_models() -> HashMap<TargetLanguage, ModelSelector> {
    [
        (TargetLanguage::Cn, "Helsinki-NLP/opus-mt-en-zh"),
        (TargetLanguage::Es, "Helsinki-NLP/opus-mt-en-es"),
        (TargetLanguage::Fr, "Helsinki-NLP/opus-mt-en-fr"),
        (TargetLanguage::De, "Helsinki-NLP/opus-mt-en-de"),
        (TargetLanguage::Ja, "Helsinki-NLP/opus-mt-en-jap"),
    ]
    .into_iter()
    .map(|(lang, id)| (lang, ModelSelector::new(id)))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_in_catalog() {
        assert!(find_model(DEFAULT_SUMMARIZATION_MODEL).is_some());
        assert_eq!(default_summarization_model().as_str(), SUMMARIZATION_MODELS[0].id);
        assert!(find_model("nope/nope").is_none());
    }

    #[test]
    fn test_translation_map_has_no_english() {
        let models = default_translation_models();
        assert!(!models.contains_key(&TargetLanguage::En));
        assert_eq!(models[&TargetLanguage::Cn].as_str(), "Helsinki-NLP/opus-mt-en-zh");
        assert_eq!(models.len(), 5);
    }
}

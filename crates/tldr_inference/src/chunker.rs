//! Sentence-aligned chunking.
//!
//! A sentence is a run of non-terminal characters followed by one or more of
//! `.`, `!` or `?`. Whatever trails the last terminal mark is kept as a final
//! fragment so no input text is lost. Chunks group a fixed number of
//! consecutive sentences and never split one.

use lazy_static::lazy_static;
use regex::Regex;
use tldr_core::Chunk;

lazy_static! {
    static ref SENTENCE: Regex = Regex::new(r"[^.!?]*[.!?]+|[^.!?]+$").expect("valid sentence regex");
}

fn has_terminal(text: &str) -> bool {
    text.contains(['.', '!', '?'])
}

/// Splits `text` into trimmed sentences, in order. Whitespace-only pieces are
/// skipped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Groups the sentences of `text` into chunks of at most `sentences_per_chunk`
/// sentences, joined with a single space.
///
/// Text without any terminal punctuation (including the empty string) comes
/// back as exactly one chunk equal to the input.
pub fn chunk_text(text: &str, sentences_per_chunk: usize) -> Vec<Chunk> {
    let per_chunk = sentences_per_chunk.max(1);

    if !has_terminal(text) {
        return vec![Chunk {
            index: 0,
            text: text.to_string(),
            sentence_count: usize::from(!text.trim().is_empty()),
        }];
    }

    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return vec![Chunk {
            index: 0,
            text: text.to_string(),
            sentence_count: 0,
        }];
    }

    sentences
        .chunks(per_chunk)
        .enumerate()
        .map(|(index, group)| Chunk {
            index,
            text: group.join(" "),
            sentence_count: group.len(),
        })
        .collect()
}

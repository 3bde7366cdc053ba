//! Extractive summary from the leading sentences.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use meetnote_core::defaults::{SUMMARY_MAX_SENTENCES, SUMMARY_PREFIX};
use meetnote_core::{EnhancementOutput, Result, TextEnhancer};

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence break pattern is valid"));

/// Split text into trimmed, non-empty sentences in original order.
pub fn split_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Summarizes content as its first few sentences.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer {
    max_sentences: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self {
            max_sentences: SUMMARY_MAX_SENTENCES,
        }
    }
}

impl Summarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the summary text for already-resolved content.
    pub fn summarize(&self, content: &str) -> String {
        let sentences: Vec<&str> = split_sentences(content)
            .into_iter()
            .take(self.max_sentences)
            .collect();
        format!("{}{}.", SUMMARY_PREFIX, sentences.join(". "))
    }
}

#[async_trait]
impl TextEnhancer for Summarizer {
    fn name(&self) -> &str {
        "summarizer"
    }

    async fn enhance(&self, content: &str) -> Result<EnhancementOutput> {
        Ok(EnhancementOutput {
            generated_summary: Some(self.summarize(content)),
            ..Default::default()
        })
    }
}

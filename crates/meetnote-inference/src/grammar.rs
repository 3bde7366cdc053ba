//! Grammar fixing by dictionary substitution.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use meetnote_core::defaults::GRAMMAR_PREFIX;
use meetnote_core::{EnhancementOutput, Result, TextEnhancer};

/// Known misspellings and their corrections (lowercase).
const CORRECTIONS: [(&str, &str); 3] = [
    ("teh", "the"),
    ("recieve", "receive"),
    ("seperate", "separate"),
];

static MISSPELLING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let words: Vec<&str> = CORRECTIONS.iter().map(|(wrong, _)| *wrong).collect();
    Regex::new(&format!(r"(?i)\b({})\b", words.join("|"))).expect("misspelling pattern is valid")
});

/// Replace known misspellings (any letter case, whole words only) with
/// their lowercase corrections.
pub fn fix_spelling(content: &str) -> String {
    MISSPELLING_PATTERN
        .replace_all(content, |caps: &Captures| {
            let word = &caps[0];
            let lower = word.to_lowercase();
            CORRECTIONS
                .iter()
                .find(|(wrong, _)| *wrong == lower)
                .map(|(_, right)| (*right).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .into_owned()
}

/// Produces enhanced notes with common misspellings corrected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarFixer;

#[async_trait]
impl TextEnhancer for GrammarFixer {
    fn name(&self) -> &str {
        "grammar_fixer"
    }

    async fn enhance(&self, content: &str) -> Result<EnhancementOutput> {
        Ok(EnhancementOutput {
            enhanced_notes: Some(format!("{}{}", GRAMMAR_PREFIX, fix_spelling(content))),
            ..Default::default()
        })
    }
}

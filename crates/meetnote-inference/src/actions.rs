//! Action item extraction by keyword and bullet patterns.
//!
//! Two pattern families run over the combined content, in order:
//!
//! 1. A keyword (`action`, `todo`, `task`, `follow-up`, `need to`, `should`,
//!    `must`, `will`) followed by whitespace, capturing up to the next
//!    sentence terminator or the end of the text.
//! 2. A line starting with a bullet marker (`-`, `*`, `•`), capturing up to
//!    the next terminator or the end of the line.
//!
//! Matches are trimmed, length-filtered and deduplicated in first-seen order.
//! Both patterns run in CRLF mode, so `\r`, `\n` and `\r\n` all end a line.

use std::collections::HashSet;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use meetnote_core::defaults::{
    ACTION_ITEMS_FALLBACK, ACTION_ITEMS_MAX, ACTION_ITEM_MAX_EXCLUSIVE, ACTION_ITEM_MIN_EXCLUSIVE,
};
use meetnote_core::{EnhancementOutput, Result, TextEnhancer};

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?iR)(?:action|todo|task|follow.?up|need to|should|must|will)\s+(.+?)(?:[.!?]|$)")
        .expect("keyword pattern is valid")
});

static BULLET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mR)^[-*•]\s*(.+?)(?:[.!?]|$)").expect("bullet pattern is valid")
});

fn within_length_bounds(candidate: &str) -> bool {
    let len = candidate.chars().count();
    len > ACTION_ITEM_MIN_EXCLUSIVE && len < ACTION_ITEM_MAX_EXCLUSIVE
}

/// Extract action items from content without applying the fallback list.
///
/// Returns at most [`ACTION_ITEMS_MAX`] unique items in first-seen order.
pub fn extract_action_items(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for pattern in [&*KEYWORD_PATTERN, &*BULLET_PATTERN] {
        for caps in pattern.captures_iter(content) {
            let Some(m) = caps.get(1) else { continue };
            let candidate = m.as_str().trim();
            if !within_length_bounds(candidate) {
                trace!(
                    subsystem = "inference",
                    component = "action_extractor",
                    candidate,
                    "Dropping action candidate outside length bounds"
                );
                continue;
            }
            if seen.insert(candidate.to_string()) {
                items.push(candidate.to_string());
            }
        }
    }

    items.truncate(ACTION_ITEMS_MAX);
    items
}

/// Extracts action items, falling back to a fixed list when nothing matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionExtractor;

#[async_trait]
impl TextEnhancer for ActionExtractor {
    fn name(&self) -> &str {
        "action_extractor"
    }

    async fn enhance(&self, content: &str) -> Result<EnhancementOutput> {
        let mut items = extract_action_items(content);
        if items.is_empty() {
            items = ACTION_ITEMS_FALLBACK.iter().map(|s| s.to_string()).collect();
        }
        Ok(EnhancementOutput {
            extracted_action_items: items,
            ..Default::default()
        })
    }
}

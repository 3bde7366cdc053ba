//! Full enhancement: normalized notes plus canned summary and action items.
//!
//! The summary and action items do not depend on the content. This mirrors
//! the behavior clients already rely on and is pinned by tests; a
//! content-aware replacement belongs in a separate [`TextEnhancer`].

use async_trait::async_trait;

use meetnote_core::defaults::{
    FULL_ENHANCEMENT_ACTION_ITEMS, FULL_ENHANCEMENT_PREFIX, FULL_ENHANCEMENT_SUMMARY,
};
use meetnote_core::{EnhancementOutput, Result, TextEnhancer};

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Populates all three outputs at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullEnhancer;

#[async_trait]
impl TextEnhancer for FullEnhancer {
    fn name(&self) -> &str {
        "full_enhancer"
    }

    async fn enhance(&self, content: &str) -> Result<EnhancementOutput> {
        Ok(EnhancementOutput {
            enhanced_notes: Some(format!(
                "{}{}",
                FULL_ENHANCEMENT_PREFIX,
                collapse_whitespace(content)
            )),
            generated_summary: Some(FULL_ENHANCEMENT_SUMMARY.to_string()),
            extracted_action_items: FULL_ENHANCEMENT_ACTION_ITEMS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }
}

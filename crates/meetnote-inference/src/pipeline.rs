//! Enhancement pipeline: input resolution and mode dispatch.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use meetnote_core::{
    EnhanceType, EnhancementRequest, EnhancementResult, Error, Meeting, Result, TextEnhancer,
};

use crate::{ActionExtractor, FullEnhancer, GrammarFixer, Summarizer};

/// First non-empty candidate, or the empty string.
fn first_non_empty<'a>(preferred: Option<&'a str>, stored: Option<&'a str>) -> &'a str {
    preferred
        .filter(|s| !s.is_empty())
        .or(stored.filter(|s| !s.is_empty()))
        .unwrap_or("")
}

/// Resolve the text an enhancer will see.
///
/// Request overrides win over stored fields when non-empty. Transcript and
/// notes are joined by a blank line, skipping whichever side is empty.
/// Fails with [`Error::EmptyContent`] when nothing but whitespace remains.
pub fn resolve_content(req: &EnhancementRequest, meeting: &Meeting) -> Result<String> {
    let transcript = first_non_empty(
        req.transcribed_text.as_deref(),
        meeting.transcribed_text.as_deref(),
    );
    let notes = first_non_empty(req.user_notes.as_deref(), meeting.general_notes.as_deref());

    let combined = [transcript, notes]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    if combined.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(combined)
}

/// Dispatches enhancement requests to one strategy per mode.
///
/// Holds no per-call state; a single instance can be shared across tasks.
#[derive(Clone)]
pub struct EnhancementPipeline {
    grammar: Arc<dyn TextEnhancer>,
    summary: Arc<dyn TextEnhancer>,
    action_items: Arc<dyn TextEnhancer>,
    full: Arc<dyn TextEnhancer>,
}

impl Default for EnhancementPipeline {
    fn default() -> Self {
        Self {
            grammar: Arc::new(GrammarFixer),
            summary: Arc::new(Summarizer::default()),
            action_items: Arc::new(ActionExtractor),
            full: Arc::new(FullEnhancer),
        }
    }
}

impl EnhancementPipeline {
    /// Pipeline with the bundled deterministic strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the strategy used for `mode`.
    pub fn with_enhancer(mut self, mode: EnhanceType, enhancer: Arc<dyn TextEnhancer>) -> Self {
        match mode {
            EnhanceType::Grammar => self.grammar = enhancer,
            EnhanceType::Summary => self.summary = enhancer,
            EnhanceType::ActionItems => self.action_items = enhancer,
            EnhanceType::FullEnhancement => self.full = enhancer,
        }
        self
    }

    /// Strategy registered for `mode`.
    pub fn enhancer(&self, mode: EnhanceType) -> &dyn TextEnhancer {
        match mode {
            EnhanceType::Grammar => self.grammar.as_ref(),
            EnhanceType::Summary => self.summary.as_ref(),
            EnhanceType::ActionItems => self.action_items.as_ref(),
            EnhanceType::FullEnhancement => self.full.as_ref(),
        }
    }

    /// Enhance `meeting` according to `req`.
    ///
    /// The caller resolves the meeting (and reports a missing one); this
    /// method never touches storage.
    pub async fn enhance(
        &self,
        req: &EnhancementRequest,
        meeting: &Meeting,
    ) -> Result<EnhancementResult> {
        if req.meeting_id != meeting.id {
            return Err(Error::InvalidInput(format!(
                "Request targets meeting {} but meeting {} was supplied",
                req.meeting_id, meeting.id
            )));
        }

        let start = Instant::now();
        let content = resolve_content(req, meeting)?;
        let enhancer = self.enhancer(req.enhance_type);

        debug!(
            subsystem = "inference",
            component = "pipeline",
            op = "resolve",
            meeting_id = req.meeting_id,
            enhance_type = %req.enhance_type,
            enhancer = enhancer.name(),
            content_len = content.len(),
            "Resolved enhancement input"
        );

        let output = enhancer.enhance(&content).await?;
        let result = output.into_result(req.meeting_id);

        info!(
            subsystem = "inference",
            component = "pipeline",
            op = "enhance",
            meeting_id = req.meeting_id,
            enhance_type = %req.enhance_type,
            result_count = result.extracted_action_items.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Enhancement complete"
        );

        Ok(result)
    }
}

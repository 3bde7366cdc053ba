//! # meetnote-inference
//!
//! Note enhancement for meetnote.
//!
//! This crate provides:
//! - One [`TextEnhancer`] strategy per [`EnhanceType`]
//!   ([`GrammarFixer`], [`Summarizer`], [`ActionExtractor`], [`FullEnhancer`])
//! - Input resolution from a request and a stored meeting ([`resolve_content`])
//! - The [`EnhancementPipeline`] that dispatches a request to its strategy
//!
//! # Example
//!
//! ```rust,no_run
//! use meetnote_inference::{EnhancementPipeline, EnhanceType, EnhancementRequest, Meeting};
//!
//! async fn summarize(meeting: &Meeting) -> meetnote_inference::Result<String> {
//!     let pipeline = EnhancementPipeline::default();
//!     let req = EnhancementRequest::new(meeting.id, EnhanceType::Summary);
//!     let result = pipeline.enhance(&req, meeting).await?;
//!     Ok(result.generated_summary.unwrap_or_default())
//! }
//! ```

pub mod actions;
pub mod full;
pub mod grammar;
pub mod pipeline;
pub mod summary;

// Re-export core types
pub use meetnote_core::*;

pub use actions::ActionExtractor;
pub use full::FullEnhancer;
pub use grammar::GrammarFixer;
pub use pipeline::{resolve_content, EnhancementPipeline};
pub use summary::Summarizer;

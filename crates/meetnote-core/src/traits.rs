//! Core traits for meetnote abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::*;

// =============================================================================
// MEETING REPOSITORY
// =============================================================================

/// Repository for meeting CRUD operations.
#[async_trait]
pub trait MeetingRepository: Send + Sync {
    /// Insert a new meeting and return the stored record.
    async fn insert(&self, req: CreateMeetingRequest) -> Result<Meeting>;

    /// List all meetings ordered by id.
    async fn list(&self) -> Result<Vec<Meeting>>;

    /// Get a meeting by id, or `None` if it does not exist.
    async fn get(&self, id: i32) -> Result<Option<Meeting>>;

    /// Fetch a meeting that must exist.
    async fn fetch(&self, id: i32) -> Result<Meeting> {
        self.get(id).await?.ok_or(Error::MeetingNotFound(id))
    }

    /// Apply a partial update. Always refreshes `updated_at`.
    async fn update(&self, req: UpdateMeetingRequest) -> Result<Meeting>;

    /// Delete a meeting. Returns whether a record was removed.
    async fn delete(&self, id: i32) -> Result<bool>;
}

// =============================================================================
// TEXT ENHANCEMENT
// =============================================================================

/// A single enhancement strategy.
///
/// The bundled implementations are deterministic text transforms; a
/// model-backed implementation can replace any of them without changing
/// the pipeline contract.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Enhance already-resolved, non-empty combined content.
    async fn enhance(&self, content: &str) -> Result<EnhancementOutput>;
}

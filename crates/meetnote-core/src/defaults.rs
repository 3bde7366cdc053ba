//! Centralized default constants for meetnote.
//!
//! Server settings, storage settings, and the fixed texts and limits used by
//! the enhancement strategies all live here so that the API, the tests, and
//! the strategies agree on one value.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const SERVER_PORT: u16 = 2022;

/// Default CORS allow-list (comma separated).
pub const ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Maximum accepted request body size in bytes.
pub const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

/// Default global rate limit: requests per period.
pub const RATE_LIMIT_REQUESTS: u32 = 100;

/// Default global rate limit period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

// =============================================================================
// STORAGE
// =============================================================================

/// Default PostgreSQL connection string.
pub const DATABASE_URL: &str = "postgres://localhost/meetnote";

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// ENHANCEMENT
// =============================================================================

/// Prefix of grammar-mode output.
pub const GRAMMAR_PREFIX: &str = "Grammar-enhanced version: ";

/// Prefix of summary-mode output.
pub const SUMMARY_PREFIX: &str = "Summary: ";

/// Number of leading sentences kept by the summarizer.
pub const SUMMARY_MAX_SENTENCES: usize = 3;

/// Extracted action items shorter than or equal to this are dropped.
pub const ACTION_ITEM_MIN_EXCLUSIVE: usize = 5;

/// Extracted action items longer than or equal to this are dropped.
pub const ACTION_ITEM_MAX_EXCLUSIVE: usize = 100;

/// Maximum number of extracted action items returned.
pub const ACTION_ITEMS_MAX: usize = 5;

/// Returned by action extraction when nothing matched.
pub const ACTION_ITEMS_FALLBACK: [&str; 2] = ["Review meeting notes", "Schedule follow-up"];

/// Prefix of full-enhancement notes.
pub const FULL_ENHANCEMENT_PREFIX: &str = "Enhanced notes: ";

/// Canned summary returned by full enhancement.
pub const FULL_ENHANCEMENT_SUMMARY: &str =
    "Full summary: Key discussion points covered important topics with multiple attendees participating.";

/// Canned action items returned by full enhancement.
pub const FULL_ENHANCEMENT_ACTION_ITEMS: [&str; 3] = [
    "Complete assigned tasks",
    "Prepare for next meeting",
    "Share meeting summary",
];

//! # meetnote-core
//!
//! Core types, traits, and abstractions for the meetnote service.
//!
//! This crate provides the meeting record model, the enhancement request and
//! result types, the shared error type, and the trait seams (`MeetingRepository`,
//! `TextEnhancer`) that the storage and inference crates implement.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;

//! HTTP handlers for meetnote-api.

pub mod enhance;
pub mod meetings;

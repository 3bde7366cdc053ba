//! Core data models for meetnote.
//!
//! These types are shared across all meetnote crates: the persisted meeting
//! record, the create/update requests the store accepts, and the ephemeral
//! enhancement request and result.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Distinguish an absent field from an explicit `null` on patch requests.
///
/// Absent deserializes to `None` (via `#[serde(default)]`), `null` to
/// `Some(None)`, and a value to `Some(Some(v))`.
fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Treat empty strings as missing.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// =============================================================================
// MEETING TYPES
// =============================================================================

/// A persisted meeting record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Meeting {
    pub id: i32,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Attendee names in insertion order.
    pub attendees: Vec<String>,
    pub general_notes: Option<String>,
    pub discussion_points: Vec<String>,
    pub action_items: Vec<String>,
    pub summary: Option<String>,
    /// Transcript produced outside this service (no audio is ever received).
    pub transcribed_text: Option<String>,
    pub ai_enhanced_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request for creating a new meeting.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateMeetingRequest {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub general_notes: Option<String>,
    #[serde(default)]
    pub discussion_points: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub ai_enhanced_notes: Option<String>,
}

impl CreateMeetingRequest {
    /// Create a request with a title and date and every other field empty.
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            date,
            attendees: Vec::new(),
            general_notes: None,
            discussion_points: Vec::new(),
            action_items: Vec::new(),
            summary: None,
            transcribed_text: None,
            ai_enhanced_notes: None,
        }
    }

    /// Reject requests without a title.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }

    /// Store empty optional text as null.
    pub fn normalized(self) -> Self {
        Self {
            general_notes: non_empty(self.general_notes),
            summary: non_empty(self.summary),
            transcribed_text: non_empty(self.transcribed_text),
            ai_enhanced_notes: non_empty(self.ai_enhanced_notes),
            ..self
        }
    }
}

/// Partial update of a meeting.
///
/// `None` leaves a field untouched. Nullable text fields take
/// `Some(None)` to clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateMeetingRequest {
    /// Target meeting. HTTP handlers take it from the path instead of the body.
    #[serde(default)]
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub general_notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discussion_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub summary: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub transcribed_text: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub ai_enhanced_notes: Option<Option<String>>,
}

impl UpdateMeetingRequest {
    /// Create an empty patch for the given meeting. Applying it only
    /// refreshes `updated_at`.
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Reject an explicitly supplied empty title.
    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Apply the supplied fields to `meeting` and stamp `updated_at = now`.
    pub fn apply_to(&self, meeting: &mut Meeting, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            meeting.title = title.clone();
        }
        if let Some(date) = self.date {
            meeting.date = date;
        }
        if let Some(attendees) = &self.attendees {
            meeting.attendees = attendees.clone();
        }
        if let Some(general_notes) = &self.general_notes {
            meeting.general_notes = general_notes.clone();
        }
        if let Some(discussion_points) = &self.discussion_points {
            meeting.discussion_points = discussion_points.clone();
        }
        if let Some(action_items) = &self.action_items {
            meeting.action_items = action_items.clone();
        }
        if let Some(summary) = &self.summary {
            meeting.summary = summary.clone();
        }
        if let Some(transcribed_text) = &self.transcribed_text {
            meeting.transcribed_text = transcribed_text.clone();
        }
        if let Some(ai_enhanced_notes) = &self.ai_enhanced_notes {
            meeting.ai_enhanced_notes = ai_enhanced_notes.clone();
        }
        meeting.updated_at = now;
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::InvalidInput("Title is required".to_string()));
    }
    Ok(())
}

// =============================================================================
// ENHANCEMENT TYPES
// =============================================================================

/// Enhancement mode requested for a single call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceType {
    Grammar,
    Summary,
    ActionItems,
    FullEnhancement,
}

impl EnhanceType {
    /// Every supported mode.
    pub const ALL: [EnhanceType; 4] = [
        EnhanceType::Grammar,
        EnhanceType::Summary,
        EnhanceType::ActionItems,
        EnhanceType::FullEnhancement,
    ];

    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Summary => "summary",
            Self::ActionItems => "action_items",
            Self::FullEnhancement => "full_enhancement",
        }
    }
}

impl FromStr for EnhanceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grammar" => Ok(Self::Grammar),
            "summary" => Ok(Self::Summary),
            "action_items" => Ok(Self::ActionItems),
            "full_enhancement" => Ok(Self::FullEnhancement),
            other => Err(Error::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for EnhanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to enhance the notes of one meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnhancementRequest {
    pub meeting_id: i32,
    /// Overrides the stored transcript when non-empty.
    #[serde(default)]
    pub transcribed_text: Option<String>,
    /// Overrides the stored general notes when non-empty.
    #[serde(default)]
    pub user_notes: Option<String>,
    pub enhance_type: EnhanceType,
}

impl EnhancementRequest {
    pub fn new(meeting_id: i32, enhance_type: EnhanceType) -> Self {
        Self {
            meeting_id,
            transcribed_text: None,
            user_notes: None,
            enhance_type,
        }
    }

    pub fn with_transcribed_text(mut self, text: impl Into<String>) -> Self {
        self.transcribed_text = Some(text.into());
        self
    }

    pub fn with_user_notes(mut self, notes: impl Into<String>) -> Self {
        self.user_notes = Some(notes.into());
        self
    }
}

/// What a single enhancer produced, before it is tied to a meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnhancementOutput {
    pub enhanced_notes: Option<String>,
    pub generated_summary: Option<String>,
    pub extracted_action_items: Vec<String>,
}

impl EnhancementOutput {
    pub fn into_result(self, meeting_id: i32) -> EnhancementResult {
        EnhancementResult {
            enhanced_notes: self.enhanced_notes,
            generated_summary: self.generated_summary,
            extracted_action_items: self.extracted_action_items,
            meeting_id,
        }
    }
}

/// Result of an enhancement call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnhancementResult {
    pub enhanced_notes: Option<String>,
    pub generated_summary: Option<String>,
    pub extracted_action_items: Vec<String>,
    pub meeting_id: i32,
}

impl EnhancementResult {
    /// Build the patch that merges this result into `meeting`.
    ///
    /// Non-empty notes and summary overwrite the stored values; extracted
    /// action items are appended after the existing ones.
    pub fn to_update(&self, meeting: &Meeting) -> UpdateMeetingRequest {
        let mut update = UpdateMeetingRequest::new(meeting.id);

        if let Some(notes) = self.enhanced_notes.as_ref().filter(|s| !s.is_empty()) {
            update.ai_enhanced_notes = Some(Some(notes.clone()));
        }
        if let Some(summary) = self.generated_summary.as_ref().filter(|s| !s.is_empty()) {
            update.summary = Some(Some(summary.clone()));
        }
        if !self.extracted_action_items.is_empty() {
            let mut merged = meeting.action_items.clone();
            merged.extend(self.extracted_action_items.iter().cloned());
            update.action_items = Some(merged);
        }

        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_meeting() -> Meeting {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        Meeting {
            id: 7,
            title: "Weekly sync".to_string(),
            date: at,
            attendees: vec!["Alice".to_string(), "Bob".to_string()],
            general_notes: Some("Budget talk".to_string()),
            discussion_points: vec!["Timeline".to_string()],
            action_items: vec!["Review proposal".to_string()],
            summary: None,
            transcribed_text: None,
            ai_enhanced_notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_enhance_type_parses_wire_names() {
        for mode in EnhanceType::ALL {
            assert_eq!(mode.as_str().parse::<EnhanceType>().unwrap(), mode);
        }
    }

    #[test]
    fn test_enhance_type_rejects_unknown() {
        let err = "invalid_type".parse::<EnhanceType>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMode(ref m) if m == "invalid_type"));
    }

    #[test]
    fn test_enhance_type_serde_matches_display() {
        let json = serde_json::to_string(&EnhanceType::FullEnhancement).unwrap();
        assert_eq!(json, "\"full_enhancement\"");
        assert_eq!(EnhanceType::ActionItems.to_string(), "action_items");
    }

    #[test]
    fn test_create_request_defaults_arrays() {
        let req: CreateMeetingRequest =
            serde_json::from_str(r#"{"title":"Kickoff","date":"2024-01-15T10:00:00Z"}"#).unwrap();
        assert!(req.attendees.is_empty());
        assert!(req.discussion_points.is_empty());
        assert!(req.action_items.is_empty());
        assert!(req.general_notes.is_none());
    }

    #[test]
    fn test_create_request_requires_title() {
        let req = CreateMeetingRequest::new("", Utc::now());
        assert!(matches!(req.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_create_request_normalizes_empty_text() {
        let mut req = CreateMeetingRequest::new("Kickoff", Utc::now());
        req.general_notes = Some(String::new());
        req.summary = Some("kept".to_string());
        let req = req.normalized();
        assert_eq!(req.general_notes, None);
        assert_eq!(req.summary.as_deref(), Some("kept"));
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdateMeetingRequest =
            serde_json::from_str(r#"{"id":1,"summary":null,"title":"New"}"#).unwrap();
        assert_eq!(req.summary, Some(None));
        assert_eq!(req.general_notes, None);
        assert_eq!(req.title.as_deref(), Some("New"));
    }

    #[test]
    fn test_update_request_rejects_empty_title() {
        let mut req = UpdateMeetingRequest::new(1);
        req.title = Some(String::new());
        assert!(req.validate().is_err());
        assert!(UpdateMeetingRequest::new(1).validate().is_ok());
    }

    #[test]
    fn test_apply_to_touches_only_supplied_fields() {
        let mut meeting = sample_meeting();
        let original = meeting.clone();
        let later = original.updated_at + chrono::Duration::minutes(5);

        let mut update = UpdateMeetingRequest::new(meeting.id);
        update.title = Some("Renamed".to_string());
        update.general_notes = Some(None);
        update.apply_to(&mut meeting, later);

        assert_eq!(meeting.title, "Renamed");
        assert_eq!(meeting.general_notes, None);
        assert_eq!(meeting.attendees, original.attendees);
        assert_eq!(meeting.action_items, original.action_items);
        assert_eq!(meeting.created_at, original.created_at);
        assert_eq!(meeting.updated_at, later);
    }

    #[test]
    fn test_to_update_appends_action_items() {
        let meeting = sample_meeting();
        let result = EnhancementResult {
            enhanced_notes: None,
            generated_summary: Some("Summary: Budget talk.".to_string()),
            extracted_action_items: vec!["Send the invoice".to_string()],
            meeting_id: meeting.id,
        };

        let update = result.to_update(&meeting);
        assert_eq!(
            update.action_items,
            Some(vec![
                "Review proposal".to_string(),
                "Send the invoice".to_string()
            ])
        );
        assert_eq!(update.summary, Some(Some("Summary: Budget talk.".to_string())));
        assert_eq!(update.ai_enhanced_notes, None);
    }

    #[test]
    fn test_to_update_skips_empty_outputs() {
        let meeting = sample_meeting();
        let result = EnhancementOutput {
            enhanced_notes: Some(String::new()),
            ..Default::default()
        }
        .into_result(meeting.id);

        assert_eq!(result.to_update(&meeting), UpdateMeetingRequest::new(meeting.id));
    }
}

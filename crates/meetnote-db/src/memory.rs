//! In-memory meeting repository.
//!
//! Backs tests and `STORAGE_BACKEND=memory` deployments. Records live for the
//! lifetime of the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use meetnote_core::{
    CreateMeetingRequest, Error, Meeting, MeetingRepository, Result, UpdateMeetingRequest,
};

#[derive(Debug)]
struct Store {
    next_id: i32,
    meetings: BTreeMap<i32, Meeting>,
}

/// MeetingRepository over an ordered map guarded by a `RwLock`.
#[derive(Debug)]
pub struct InMemoryMeetingRepository {
    store: RwLock<Store>,
}

impl Default for InMemoryMeetingRepository {
    fn default() -> Self {
        Self {
            store: RwLock::new(Store {
                next_id: 1,
                meetings: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryMeetingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeetingRepository for InMemoryMeetingRepository {
    async fn insert(&self, req: CreateMeetingRequest) -> Result<Meeting> {
        req.validate()?;
        let req = req.normalized();
        let now = Utc::now();

        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| Error::Internal("meeting id space exhausted".to_string()))?;

        let meeting = Meeting {
            id,
            title: req.title,
            date: req.date,
            attendees: req.attendees,
            general_notes: req.general_notes,
            discussion_points: req.discussion_points,
            action_items: req.action_items,
            summary: req.summary,
            transcribed_text: req.transcribed_text,
            ai_enhanced_notes: req.ai_enhanced_notes,
            created_at: now,
            updated_at: now,
        };
        store.meetings.insert(id, meeting.clone());

        info!(
            subsystem = "db",
            component = "memory",
            op = "insert",
            meeting_id = id,
            "Meeting created"
        );
        Ok(meeting)
    }

    async fn list(&self) -> Result<Vec<Meeting>> {
        Ok(self.store.read().await.meetings.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Meeting>> {
        Ok(self.store.read().await.meetings.get(&id).cloned())
    }

    async fn update(&self, req: UpdateMeetingRequest) -> Result<Meeting> {
        req.validate()?;
        let mut store = self.store.write().await;
        let meeting = store
            .meetings
            .get_mut(&req.id)
            .ok_or(Error::MeetingNotFound(req.id))?;

        req.apply_to(meeting, Utc::now());
        Ok(meeting.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        Ok(self.store.write().await.meetings.remove(&id).is_some())
    }
}

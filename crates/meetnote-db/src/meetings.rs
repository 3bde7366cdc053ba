//! Meeting repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, info};

use meetnote_core::{
    CreateMeetingRequest, Error, Meeting, MeetingRepository, Result, UpdateMeetingRequest,
};

const MEETING_COLUMNS: &str = "id, title, date, attendees, general_notes, discussion_points, \
     action_items, summary, transcribed_text, ai_enhanced_notes, created_at, updated_at";

/// PostgreSQL implementation of MeetingRepository.
#[derive(Clone)]
pub struct PgMeetingRepository {
    pool: Pool<Postgres>,
}

impl PgMeetingRepository {
    /// Create a new PgMeetingRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Map a `meetings` row to a Meeting.
fn map_row(row: &PgRow) -> Result<Meeting> {
    Ok(Meeting {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        date: row.try_get("date")?,
        attendees: row.try_get::<Json<Vec<String>>, _>("attendees")?.0,
        general_notes: row.try_get("general_notes")?,
        discussion_points: row.try_get::<Json<Vec<String>>, _>("discussion_points")?.0,
        action_items: row.try_get::<Json<Vec<String>>, _>("action_items")?.0,
        summary: row.try_get("summary")?,
        transcribed_text: row.try_get("transcribed_text")?,
        ai_enhanced_notes: row.try_get("ai_enhanced_notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Build the SET clause for a partial update.
///
/// `$1` is always `updated_at`; supplied fields follow in declaration order
/// and the id placeholder comes last. Returns the clause and the id
/// placeholder index.
fn build_update_clause(req: &UpdateMeetingRequest) -> (String, usize) {
    let mut updates = vec!["updated_at = $1".to_string()];
    let mut param_idx = 2;

    let supplied = [
        ("title", req.title.is_some()),
        ("date", req.date.is_some()),
        ("attendees", req.attendees.is_some()),
        ("general_notes", req.general_notes.is_some()),
        ("discussion_points", req.discussion_points.is_some()),
        ("action_items", req.action_items.is_some()),
        ("summary", req.summary.is_some()),
        ("transcribed_text", req.transcribed_text.is_some()),
        ("ai_enhanced_notes", req.ai_enhanced_notes.is_some()),
    ];

    for (column, present) in supplied {
        if present {
            updates.push(format!("{} = ${}", column, param_idx));
            param_idx += 1;
        }
    }

    (updates.join(", "), param_idx)
}

#[async_trait]
impl MeetingRepository for PgMeetingRepository {
    async fn insert(&self, req: CreateMeetingRequest) -> Result<Meeting> {
        req.validate()?;
        let req = req.normalized();
        let now = Utc::now();

        let query = format!(
            r#"
            INSERT INTO meetings (title, date, attendees, general_notes, discussion_points,
                action_items, summary, transcribed_text, ai_enhanced_notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING {}
            "#,
            MEETING_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&req.title)
            .bind(req.date)
            .bind(Json(&req.attendees))
            .bind(&req.general_notes)
            .bind(Json(&req.discussion_points))
            .bind(Json(&req.action_items))
            .bind(&req.summary)
            .bind(&req.transcribed_text)
            .bind(&req.ai_enhanced_notes)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        let meeting = map_row(&row)?;
        info!(
            subsystem = "db",
            component = "meetings",
            op = "insert",
            meeting_id = meeting.id,
            "Meeting created"
        );
        Ok(meeting)
    }

    async fn list(&self) -> Result<Vec<Meeting>> {
        let query = format!("SELECT {} FROM meetings ORDER BY id", MEETING_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "meetings",
            op = "list",
            result_count = rows.len(),
            "Listed meetings"
        );
        rows.iter().map(map_row).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Meeting>> {
        let query = format!("SELECT {} FROM meetings WHERE id = $1", MEETING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn update(&self, req: UpdateMeetingRequest) -> Result<Meeting> {
        req.validate()?;
        let now = Utc::now();
        let (set_clause, id_idx) = build_update_clause(&req);

        let query = format!(
            "UPDATE meetings SET {} WHERE id = ${} RETURNING {}",
            set_clause, id_idx, MEETING_COLUMNS
        );

        let mut q = sqlx::query(&query).bind(now);

        if let Some(title) = &req.title {
            q = q.bind(title);
        }
        if let Some(date) = req.date {
            q = q.bind(date);
        }
        if let Some(attendees) = &req.attendees {
            q = q.bind(Json(attendees));
        }
        if let Some(general_notes) = &req.general_notes {
            q = q.bind(general_notes);
        }
        if let Some(discussion_points) = &req.discussion_points {
            q = q.bind(Json(discussion_points));
        }
        if let Some(action_items) = &req.action_items {
            q = q.bind(Json(action_items));
        }
        if let Some(summary) = &req.summary {
            q = q.bind(summary);
        }
        if let Some(transcribed_text) = &req.transcribed_text {
            q = q.bind(transcribed_text);
        }
        if let Some(ai_enhanced_notes) = &req.ai_enhanced_notes {
            q = q.bind(ai_enhanced_notes);
        }

        let row = q
            .bind(req.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::MeetingNotFound(req.id))?;

        info!(
            subsystem = "db",
            component = "meetings",
            op = "update",
            meeting_id = req.id,
            "Meeting updated"
        );
        map_row(&row)
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let deleted = result.rows_affected() > 0;
        info!(
            subsystem = "db",
            component = "meetings",
            op = "delete",
            meeting_id = id,
            deleted,
            "Meeting delete processed"
        );
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_clause_only_refreshes_timestamp_when_empty() {
        let (clause, id_idx) = build_update_clause(&UpdateMeetingRequest::new(3));
        assert_eq!(clause, "updated_at = $1");
        assert_eq!(id_idx, 2);
    }

    #[test]
    fn test_update_clause_numbers_supplied_fields_in_order() {
        let mut req = UpdateMeetingRequest::new(3);
        req.summary = Some(None);
        req.title = Some("Renamed".to_string());
        req.action_items = Some(vec!["Ship".to_string()]);

        let (clause, id_idx) = build_update_clause(&req);
        assert_eq!(
            clause,
            "updated_at = $1, title = $2, action_items = $3, summary = $4"
        );
        assert_eq!(id_idx, 5);
    }
}

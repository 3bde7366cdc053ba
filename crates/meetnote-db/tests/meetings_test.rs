//! Integration tests for the PostgreSQL meeting repository.
//!
//! Tests verify:
//! - Created records echo their input and get matching timestamps
//! - Partial updates touch only supplied fields and refresh `updated_at`
//! - Array columns keep element order
//! - Missing ids surface as `None`, `MeetingNotFound` or `false`
//!
//! Requires a PostgreSQL instance at DATABASE_URL (default: see
//! `test_fixtures::DEFAULT_TEST_DATABASE_URL`).

use meetnote_db::test_fixtures::{meeting_request, TestDatabase};
use meetnote_db::{Error, MeetingRepository, UpdateMeetingRequest};

async fn setup() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::new().await
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_insert_and_get() {
    let test_db = setup().await;
    let req = meeting_request("Weekly Sync");
    let created = test_db.create_meeting(req.clone()).await;

    assert!(created.id > 0);
    assert_eq!(created.title, "Weekly Sync");
    assert_eq!(created.date, req.date);
    assert_eq!(created.general_notes, req.general_notes);
    assert_eq!(created.transcribed_text, req.transcribed_text);
    assert_eq!(created.summary, None);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = test_db
        .db
        .meetings
        .get(created.id)
        .await
        .expect("get failed")
        .expect("meeting should exist");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, created.title);
    assert_eq!(fetched.attendees, created.attendees);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_insert_normalizes_empty_strings() {
    let test_db = setup().await;
    let mut req = meeting_request("Empty notes");
    req.general_notes = Some(String::new());
    req.transcribed_text = Some(String::new());
    let created = test_db.create_meeting(req).await;

    assert_eq!(created.general_notes, None);
    assert_eq!(created.transcribed_text, None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_insert_rejects_empty_title() {
    let test_db = setup().await;
    let err = test_db
        .db
        .meetings
        .insert(meeting_request(""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_arrays_keep_order() {
    let test_db = setup().await;
    let mut req = meeting_request("Order");
    req.attendees = vec!["Zoe".into(), "Adam".into(), "Mia".into()];
    req.action_items = vec!["Third".into(), "First".into(), "Second".into()];
    let created = test_db.create_meeting(req).await;

    let fetched = test_db.db.meetings.fetch(created.id).await.unwrap();
    assert_eq!(fetched.attendees, vec!["Zoe", "Adam", "Mia"]);
    assert_eq!(fetched.action_items, vec!["Third", "First", "Second"]);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_partial_update() {
    let test_db = setup().await;
    let original = test_db.create_meeting(meeting_request("Original")).await;

    let mut update = UpdateMeetingRequest::new(original.id);
    update.title = Some("Partially Updated Title".to_string());
    update.summary = Some(Some("New summary only".to_string()));
    let updated = test_db.db.meetings.update(update).await.unwrap();

    assert_eq!(updated.title, "Partially Updated Title");
    assert_eq!(updated.summary.as_deref(), Some("New summary only"));
    assert_eq!(updated.general_notes, original.general_notes);
    assert_eq!(updated.attendees, original.attendees);
    assert_eq!(updated.action_items, original.action_items);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_update_can_clear_nullable_text() {
    let test_db = setup().await;
    let original = test_db.create_meeting(meeting_request("Clear")).await;
    assert!(original.general_notes.is_some());

    let mut update = UpdateMeetingRequest::new(original.id);
    update.general_notes = Some(None);
    let updated = test_db.db.meetings.update(update).await.unwrap();
    assert_eq!(updated.general_notes, None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_empty_update_refreshes_timestamp_only() {
    let test_db = setup().await;
    let original = test_db.create_meeting(meeting_request("Touch")).await;

    let updated = test_db
        .db
        .meetings
        .update(UpdateMeetingRequest::new(original.id))
        .await
        .unwrap();
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.general_notes, original.general_notes);
    assert!(updated.updated_at >= original.updated_at);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_missing_ids() {
    let test_db = setup().await;
    let missing = i32::MAX;

    assert!(test_db.db.meetings.get(missing).await.unwrap().is_none());
    assert!(matches!(
        test_db.db.meetings.fetch(missing).await,
        Err(Error::MeetingNotFound(id)) if id == missing
    ));
    assert!(matches!(
        test_db
            .db
            .meetings
            .update(UpdateMeetingRequest::new(missing))
            .await,
        Err(Error::MeetingNotFound(_))
    ));
    assert!(!test_db.db.meetings.delete(missing).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_delete_and_list() {
    let test_db = setup().await;
    let keep = test_db.create_meeting(meeting_request("Keep")).await;
    let doomed = test_db.create_meeting(meeting_request("Doomed")).await;

    assert!(test_db.db.meetings.delete(doomed.id).await.unwrap());

    let ids: Vec<i32> = test_db
        .db
        .meetings
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert!(ids.contains(&keep.id));
    assert!(!ids.contains(&doomed.id));
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    test_db.cleanup().await;
}

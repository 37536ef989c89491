//! Reminder scanner tests against in-memory fakes.

mod common;

use std::sync::Arc;

use common::{date, registrant, training, writer, FakeDirectory, MemoryStore, RecordingPush};
use hrdc_events::reminder::REMINDER_TITLE;
use hrdc_events::{ReminderScanner, ScanState, ScheduledTask};

#[tokio::test]
async fn training_three_days_out_reminds_its_registrant() {
    let today = date(2026, 3, 7);
    let soon = training(1, "Rust 101", date(2026, 3, 10), None);
    let directory = FakeDirectory {
        confirmed: vec![registrant(1, &soon, 42)],
        trainings: vec![soon],
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::default());
    let push = Arc::new(RecordingPush::default());
    let scanner = ReminderScanner::new(Arc::new(directory), writer(&store, &push), vec![3, 1]);

    let created = scanner.scan_for(today).await.unwrap();

    assert_eq!(created, 1);
    let rows = store.all();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, Some(42));
    assert_eq!(rows[0].title, REMINDER_TITLE);
    assert!(rows[0].message.contains("3 day"));
}

#[tokio::test]
async fn one_day_offset_uses_singular() {
    let today = date(2026, 3, 9);
    let tomorrow = training(1, "Rust 101", date(2026, 3, 10), None);
    let directory = FakeDirectory {
        confirmed: vec![registrant(1, &tomorrow, 42), registrant(2, &tomorrow, 43)],
        trainings: vec![tomorrow],
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::default());
    let push = Arc::new(RecordingPush::default());
    let scanner = ReminderScanner::new(Arc::new(directory), writer(&store, &push), vec![3, 1]);

    assert_eq!(scanner.scan_for(today).await.unwrap(), 2);
    assert!(store
        .all()
        .iter()
        .all(|n| n.message.contains("starts in 1 day on")));
}

#[tokio::test]
async fn other_days_and_unconfirmed_are_ignored() {
    let today = date(2026, 3, 7);
    let far = training(1, "Later", date(2026, 3, 20), None);
    let empty = training(2, "Nobody", date(2026, 3, 10), None);
    let directory = FakeDirectory {
        confirmed: vec![registrant(1, &far, 42)],
        trainings: vec![far, empty],
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::default());
    let push = Arc::new(RecordingPush::default());
    let scanner = ReminderScanner::new(Arc::new(directory), writer(&store, &push), vec![3, 1]);

    assert_eq!(scanner.scan_for(today).await.unwrap(), 0);
    assert!(store.all().is_empty());
}

#[tokio::test]
async fn run_once_returns_to_idle() {
    let store = Arc::new(MemoryStore::default());
    let push = Arc::new(RecordingPush::default());
    let scanner = ReminderScanner::new(
        Arc::new(FakeDirectory::default()),
        writer(&store, &push),
        vec![3, 1],
    );

    assert_eq!(scanner.state(), ScanState::Idle);
    assert_eq!(scanner.run_once().await.unwrap(), 0);
    assert_eq!(scanner.state(), ScanState::Idle);
    assert_eq!(scanner.name(), "training-reminders");
}

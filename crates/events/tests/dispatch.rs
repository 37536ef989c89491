//! Email dispatcher pipeline tests against in-memory fakes.
//!
//! All timing tests run on tokio's paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{account, date, training, FakeDirectory, RecordingMailer};
use hrdc_core::training::TriggerType;
use hrdc_events::dispatch::TrainingNotificationJob;
use hrdc_events::{DispatchConfig, DispatchReport, EmailDispatcher, NotificationQueue};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn engineers(count: i64) -> Vec<hrdc_db::models::employee::EmployeeAccount> {
    (1..=count)
        .map(|id| account(id, &format!("Engineer {id:02}"), "Engineering", "Software Engineer"))
        .collect()
}

fn job(training_id: i64, trigger: TriggerType) -> TrainingNotificationJob {
    TrainingNotificationJob {
        training_id,
        trigger,
        enqueued_at: chrono::Utc::now(),
    }
}

fn dispatcher(
    queue: &Arc<NotificationQueue>,
    directory: FakeDirectory,
    mailer: &Arc<RecordingMailer>,
) -> EmailDispatcher {
    EmailDispatcher::new(
        queue.clone(),
        Arc::new(directory),
        mailer.clone(),
        DispatchConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn twenty_five_recipients_go_out_in_three_paced_batches() {
    let directory = FakeDirectory {
        trainings: vec![training(1, "Rust", date(2026, 5, 1), Some("technical"))],
        candidates: engineers(25),
        ..Default::default()
    };
    // emp12 sits in the second batch.
    let mailer = Arc::new(RecordingMailer::failing_for(&["emp12@example.com"]));
    let queue = Arc::new(NotificationQueue::new());
    let dispatcher = dispatcher(&queue, directory, &mailer);

    let started = Instant::now();
    let report = dispatcher
        .process_job(&job(1, TriggerType::Created))
        .await
        .unwrap();

    assert_eq!(
        report,
        DispatchReport {
            recipients: 25,
            batches: 3,
            sent: 24,
            failed: 1,
        }
    );
    // Two pauses of 2s between three batches, none after the last.
    assert_eq!(started.elapsed(), Duration::from_secs(4));

    let attempts = mailer.attempts();
    assert_eq!(attempts.len(), 25);
    let offsets: Vec<u64> = attempts
        .iter()
        .map(|a| (a.at - started).as_secs())
        .collect();
    assert!(offsets[..10].iter().all(|s| *s == 0));
    assert!(offsets[10..20].iter().all(|s| *s == 2));
    assert!(offsets[20..].iter().all(|s| *s == 4));

    // Batch three still ran after the failure in batch two.
    assert!(attempts[20..]
        .iter()
        .any(|a| a.to == "emp25@example.com"));
}

#[tokio::test(start_paused = true)]
async fn only_eligible_candidates_are_mailed() {
    let directory = FakeDirectory {
        trainings: vec![training(1, "Leadership", date(2026, 5, 1), Some("non-technical"))],
        candidates: vec![
            account(1, "Ann", "Engineering", "Software Engineer"),
            account(2, "Ben", "HR", "HR Executive"),
            account(3, "Cat", "Finance", "Accounts Officer"),
        ],
        ..Default::default()
    };
    let mailer = Arc::new(RecordingMailer::default());
    let queue = Arc::new(NotificationQueue::new());
    let dispatcher = dispatcher(&queue, directory, &mailer);

    let report = dispatcher
        .process_job(&job(1, TriggerType::Updated))
        .await
        .unwrap();

    assert_eq!(report.recipients, 2);
    assert_eq!(report.batches, 1);
    let to: Vec<String> = mailer.attempts().into_iter().map(|a| a.to).collect();
    assert_eq!(to, vec!["emp02@example.com", "emp03@example.com"]);
    assert!(mailer
        .attempts()
        .iter()
        .all(|a| a.subject == "Training Updated: Leadership"));
}

#[tokio::test(start_paused = true)]
async fn missing_training_is_skipped() {
    let mailer = Arc::new(RecordingMailer::default());
    let queue = Arc::new(NotificationQueue::new());
    let dispatcher = dispatcher(
        &queue,
        FakeDirectory {
            candidates: engineers(3),
            ..Default::default()
        },
        &mailer,
    );

    let report = dispatcher
        .process_job(&job(99, TriggerType::Reminder))
        .await
        .unwrap();

    assert_eq!(report, DispatchReport::default());
    assert!(mailer.attempts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn worker_drains_jobs_in_fifo_order() {
    let directory = FakeDirectory {
        trainings: vec![
            training(1, "First", date(2026, 5, 1), None),
            training(2, "Second", date(2026, 5, 2), None),
        ],
        // 12 recipients: job one needs two batches and a pause.
        candidates: engineers(12),
        ..Default::default()
    };
    let mailer = Arc::new(RecordingMailer::default());
    let queue = Arc::new(NotificationQueue::new());
    queue.enqueue(1, TriggerType::Created);
    queue.enqueue(2, TriggerType::Created);

    let cancel = CancellationToken::new();
    let worker = {
        let dispatcher = dispatcher(&queue, directory, &mailer);
        let cancel = cancel.clone();
        tokio::spawn(async move { dispatcher.run(cancel).await })
    };

    while mailer.attempts().len() < 24 {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    cancel.cancel();
    worker.await.unwrap();

    let subjects: Vec<String> = mailer.attempts().into_iter().map(|a| a.subject).collect();
    let first_of_second = subjects
        .iter()
        .position(|s| s.ends_with("Second"))
        .unwrap();
    assert_eq!(first_of_second, 12);
    assert!(subjects[..12].iter().all(|s| s.ends_with("First")));
    assert!(subjects[12..].iter().all(|s| s.ends_with("Second")));
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn worker_backs_off_after_a_failed_job_and_keeps_going() {
    let directory = FakeDirectory {
        trainings: vec![training(2, "Second", date(2026, 5, 2), None)],
        candidates: engineers(2),
        broken_training: Some(1),
        ..Default::default()
    };
    let mailer = Arc::new(RecordingMailer::default());
    let queue = Arc::new(NotificationQueue::new());
    queue.enqueue(1, TriggerType::Created);
    queue.enqueue(2, TriggerType::Created);

    let started = Instant::now();
    let cancel = CancellationToken::new();
    let worker = {
        let dispatcher = dispatcher(&queue, directory, &mailer);
        let cancel = cancel.clone();
        tokio::spawn(async move { dispatcher.run(cancel).await })
    };

    while mailer.attempts().len() < 2 {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    cancel.cancel();
    worker.await.unwrap();

    let attempts = mailer.attempts();
    assert!(attempts.iter().all(|a| a.subject.ends_with("Second")));
    let backoff = DispatchConfig::default().error_backoff;
    assert!(attempts.iter().all(|a| a.at - started == backoff));
    assert!(queue.is_empty());
}

#[tokio::test(start_paused = true)]
async fn worker_stops_on_cancel_while_idle() {
    let mailer = Arc::new(RecordingMailer::default());
    let queue = Arc::new(NotificationQueue::new());
    let dispatcher = dispatcher(&queue, FakeDirectory::default(), &mailer);
    let cancel = CancellationToken::new();

    let worker = {
        let cancel = cancel.clone();
        tokio::spawn(async move { dispatcher.run(cancel).await })
    };

    tokio::time::sleep(Duration::from_secs(12)).await;
    cancel.cancel();
    worker.await.unwrap();
    assert!(mailer.attempts().is_empty());
}

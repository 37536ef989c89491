//! Queued training email dispatch.
//!
//! Handlers enqueue a [`TrainingNotificationJob`] and return immediately.
//! A single [`EmailDispatcher`] drains the [`NotificationQueue`] in FIFO
//! order: each job resolves its training, filters the candidate employees
//! by eligibility, and mails them in fixed-size batches. Sends inside a
//! batch run concurrently; consecutive batches are separated by a pause.
//!
//! Delivery is at most once per enqueue. Jobs live only in memory and are
//! lost if the process stops before they are drained.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::future::join_all;
use hrdc_core::eligibility;
use hrdc_core::training::TriggerType;
use hrdc_core::types::{DbId, Timestamp};
use hrdc_db::models::employee::EmployeeAccount;
use tokio_util::sync::CancellationToken;

use crate::delivery::email::{EmailError, MailTransport};
use crate::store::TrainingDirectory;
use crate::templates;

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// A request to email eligible employees about one training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingNotificationJob {
    pub training_id: DbId,
    pub trigger: TriggerType,
    pub enqueued_at: Timestamp,
}

/// Unbounded, thread-safe FIFO of email jobs.
///
/// No deduplication: enqueuing the same training twice sends twice.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    jobs: Mutex<VecDeque<TrainingNotificationJob>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<TrainingNotificationJob>> {
        // A panic while holding the lock cannot leave the deque half-written.
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append a job to the back of the queue.
    pub fn enqueue(&self, training_id: DbId, trigger: TriggerType) {
        let job = TrainingNotificationJob {
            training_id,
            trigger,
            enqueued_at: chrono::Utc::now(),
        };
        let depth = {
            let mut jobs = self.lock();
            jobs.push_back(job);
            jobs.len()
        };
        tracing::info!(training_id, %trigger, depth, "Training email job queued");
    }

    /// Take the oldest job, if any.
    pub fn dequeue(&self) -> Option<TrainingNotificationJob> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

const DEFAULT_BATCH_SIZE: usize = 10;
const DEFAULT_BATCH_PAUSE_SECS: u64 = 2;
const DEFAULT_IDLE_POLL_SECS: u64 = 5;
const DEFAULT_ERROR_BACKOFF_SECS: u64 = 1;

/// Pacing for the email dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum concurrent sends per batch. Always at least 1.
    pub batch_size: usize,
    /// Pause between consecutive batches of one job.
    pub batch_pause: Duration,
    /// Sleep when the queue is empty.
    pub idle_poll: Duration,
    /// Sleep after a job fails before polling again.
    pub error_backoff: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: Duration::from_secs(DEFAULT_BATCH_PAUSE_SECS),
            idle_poll: Duration::from_secs(DEFAULT_IDLE_POLL_SECS),
            error_backoff: Duration::from_secs(DEFAULT_ERROR_BACKOFF_SECS),
        }
    }
}

impl DispatchConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `EMAIL_BATCH_SIZE`         | `10`    |
    /// | `EMAIL_BATCH_PAUSE_SECS`   | `2`     |
    /// | `EMAIL_IDLE_POLL_SECS`     | `5`     |
    /// | `EMAIL_ERROR_BACKOFF_SECS` | `1`     |
    pub fn from_env() -> Self {
        let secs = |key: &str, default: u64| {
            Duration::from_secs(
                std::env::var(key)
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(default),
            )
        };

        Self {
            batch_size: std::env::var("EMAIL_BATCH_SIZE")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_BATCH_SIZE)
                .max(1),
            batch_pause: secs("EMAIL_BATCH_PAUSE_SECS", DEFAULT_BATCH_PAUSE_SECS),
            idle_poll: secs("EMAIL_IDLE_POLL_SECS", DEFAULT_IDLE_POLL_SECS),
            error_backoff: secs("EMAIL_ERROR_BACKOFF_SECS", DEFAULT_ERROR_BACKOFF_SECS),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Outcome of processing one job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Eligible employees the job targeted.
    pub recipients: usize,
    pub batches: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Background worker that drains the [`NotificationQueue`].
pub struct EmailDispatcher {
    queue: Arc<NotificationQueue>,
    directory: Arc<dyn TrainingDirectory>,
    mailer: Arc<dyn MailTransport>,
    config: DispatchConfig,
}

impl EmailDispatcher {
    pub fn new(
        queue: Arc<NotificationQueue>,
        directory: Arc<dyn TrainingDirectory>,
        mailer: Arc<dyn MailTransport>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            queue,
            directory,
            mailer,
            config,
        }
    }

    /// Run the worker loop until the cancellation token is triggered.
    ///
    /// One job is processed at a time. A job that is already running when
    /// cancellation arrives is finished; nothing further is dequeued.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::info!(
            batch_size = self.config.batch_size,
            batch_pause_ms = self.config.batch_pause.as_millis() as u64,
            "Email dispatcher started",
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let Some(job) = self.queue.dequeue() else {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(self.config.idle_poll) => {}
                }
                continue;
            };

            match self.process_job(&job).await {
                Ok(report) => {
                    tracing::info!(
                        training_id = job.training_id,
                        trigger = %job.trigger,
                        recipients = report.recipients,
                        batches = report.batches,
                        sent = report.sent,
                        failed = report.failed,
                        "Training email job finished",
                    );
                }
                Err(e) => {
                    tracing::error!(
                        training_id = job.training_id,
                        trigger = %job.trigger,
                        error = %e,
                        "Training email job failed",
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                    }
                }
            }
        }

        tracing::info!(pending = self.queue.len(), "Email dispatcher shutting down");
    }

    /// Process a single job: resolve, filter, and mail in batches.
    ///
    /// A missing training yields an empty report. Individual send failures
    /// are counted, not returned.
    pub async fn process_job(
        &self,
        job: &TrainingNotificationJob,
    ) -> Result<DispatchReport, sqlx::Error> {
        let Some(training) = self.directory.find_training(job.training_id).await? else {
            tracing::warn!(
                training_id = job.training_id,
                trigger = %job.trigger,
                "Training not found, skipping email job",
            );
            return Ok(DispatchReport::default());
        };

        let recipients: Vec<EmployeeAccount> = self
            .directory
            .active_candidates()
            .await?
            .into_iter()
            .filter(|c| eligibility::matches(training.eligibility.as_deref(), &c.profile()))
            .collect();

        let mut report = DispatchReport {
            recipients: recipients.len(),
            ..Default::default()
        };
        if recipients.is_empty() {
            return Ok(report);
        }

        let subject = templates::subject(job.trigger, &training.title);
        let batch_size = self.config.batch_size.max(1);

        for (index, batch) in recipients.chunks(batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.batch_pause).await;
            }

            let sends = batch.iter().map(|recipient| {
                let rendered = templates::render_training_email(job.trigger, &recipient.name, &training);
                let subject = subject.as_str();
                async move {
                    let result = match rendered {
                        Ok(html) => self.mailer.send(&recipient.email, subject, &html).await,
                        Err(e) => Err(EmailError::from(e)),
                    };
                    (recipient, result)
                }
            });

            for (recipient, result) in join_all(sends).await {
                match result {
                    Ok(()) => report.sent += 1,
                    Err(e) => {
                        report.failed += 1;
                        tracing::warn!(
                            training_id = training.id,
                            batch = index + 1,
                            employee_id = recipient.id,
                            to = %recipient.email,
                            error = %e,
                            "Training email failed",
                        );
                    }
                }
            }

            report.batches += 1;
            tracing::debug!(
                training_id = training.id,
                batch = index + 1,
                size = batch.len(),
                "Email batch sent",
            );
        }

        Ok(report)
    }
}

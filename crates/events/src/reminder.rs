//! Daily training reminders.
//!
//! [`ReminderScanner`] finds trainings starting a fixed number of days from
//! today and sends an in-app reminder to every confirmed registrant. It is
//! driven by [`Scheduler`](crate::scheduler::Scheduler).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use hrdc_core::training::{reminder_message, DEFAULT_REMINDER_OFFSETS};

use crate::notifier::{NotificationWriter, NotifyError};
use crate::scheduler::{ScheduledTask, TaskError};
use crate::store::TrainingDirectory;

/// Title of every reminder notification.
pub const REMINDER_TITLE: &str = "Training Reminder";

const DEFAULT_INTERVAL_HOURS: u64 = 24;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// How often to scan and which day offsets to remind on.
#[derive(Debug, Clone)]
pub struct ReminderConfig {
    pub interval: Duration,
    pub days_ahead: Vec<i64>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_HOURS * 3600),
            days_ahead: DEFAULT_REMINDER_OFFSETS.to_vec(),
        }
    }
}

impl ReminderConfig {
    /// Load from environment variables, falling back to defaults.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `REMINDER_INTERVAL_HOURS` | `24`    |
    /// | `REMINDER_DAYS_AHEAD`     | `3,1`   |
    pub fn from_env() -> Self {
        let hours: u64 = std::env::var("REMINDER_INTERVAL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_INTERVAL_HOURS);

        let days_ahead = std::env::var("REMINDER_DAYS_AHEAD")
            .ok()
            .map(|v| parse_offsets(&v))
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_REMINDER_OFFSETS.to_vec());

        Self {
            interval: Duration::from_secs(hours * 3600),
            days_ahead,
        }
    }
}

/// Parse a comma-separated list of non-negative day offsets, skipping junk.
fn parse_offsets(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .filter(|d| *d >= 0)
        .collect()
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Whether a scan is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

/// Resets the scanner to `Idle` when dropped, including on error paths.
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Periodic task that reminds confirmed registrants of upcoming trainings.
pub struct ReminderScanner {
    directory: Arc<dyn TrainingDirectory>,
    writer: NotificationWriter,
    days_ahead: Vec<i64>,
    scanning: AtomicBool,
}

impl ReminderScanner {
    pub fn new(
        directory: Arc<dyn TrainingDirectory>,
        writer: NotificationWriter,
        days_ahead: Vec<i64>,
    ) -> Self {
        Self {
            directory,
            writer,
            days_ahead,
            scanning: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> ScanState {
        if self.scanning.load(Ordering::Acquire) {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    /// Send reminders as if today were `today`.
    ///
    /// Returns the number of notifications created. A failure for one
    /// registrant is logged and skipped; failing to list trainings or
    /// registrants aborts the scan.
    pub async fn scan_for(&self, today: NaiveDate) -> Result<usize, NotifyError> {
        let mut created = 0;

        for &days in &self.days_ahead {
            let Some(target) = today.checked_add_signed(chrono::Duration::days(days)) else {
                continue;
            };

            for training in self.directory.trainings_starting_on(target).await? {
                let message = reminder_message(&training.title, training.start_date, days);

                for registrant in self.directory.confirmed_registrants(training.id).await? {
                    match self
                        .writer
                        .notify(Some(registrant.user_id), None, REMINDER_TITLE, &message)
                        .await
                    {
                        Ok(_) => created += 1,
                        Err(e) => {
                            tracing::warn!(
                                training_id = training.id,
                                user_id = registrant.user_id,
                                error = %e,
                                "Failed to create training reminder",
                            );
                        }
                    }
                }
            }
        }

        if created > 0 {
            tracing::info!(%today, created, "Training reminders sent");
        }
        Ok(created)
    }
}

#[async_trait]
impl ScheduledTask for ReminderScanner {
    fn name(&self) -> &'static str {
        "training-reminders"
    }

    /// Scan for today (UTC). Skips if a scan is already running.
    async fn run_once(&self) -> Result<usize, TaskError> {
        if self
            .scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Reminder scan already running, skipping");
            return Ok(0);
        }
        let _guard = ScanGuard(&self.scanning);

        let today = chrono::Utc::now().date_naive();
        Ok(self.scan_for(today).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_offsets_skips_junk_and_negatives() {
        assert_eq!(parse_offsets("3,1"), vec![3, 1]);
        assert_eq!(parse_offsets(" 7 , x, -1, 0"), vec![7, 0]);
        assert!(parse_offsets("").is_empty());
    }

    #[test]
    fn default_config() {
        let config = ReminderConfig::default();
        assert_eq!(config.interval, Duration::from_secs(86_400));
        assert_eq!(config.days_ahead, vec![3, 1]);
    }
}

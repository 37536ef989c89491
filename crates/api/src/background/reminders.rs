//! Daily training reminder scan.

use std::sync::Arc;

use hrdc_events::{NotificationWriter, PgStore, ReminderConfig, ReminderScanner, Scheduler};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the reminder scanner on its configured interval until `cancel` is
/// triggered. The first scan happens immediately.
pub async fn run(pool: PgPool, notifier: NotificationWriter, cancel: CancellationToken) {
    let config = ReminderConfig::from_env();
    tracing::info!(
        interval_hours = config.interval.as_secs() / 3600,
        days_ahead = ?config.days_ahead,
        "Training reminder job started"
    );

    let scanner = ReminderScanner::new(Arc::new(PgStore::new(pool)), notifier, config.days_ahead);
    Scheduler::run_every(&scanner, config.interval, cancel).await;
}

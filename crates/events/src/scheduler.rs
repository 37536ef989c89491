//! Fixed-interval driver for periodic background tasks.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Boxed error returned by a task run.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// A unit of periodic work.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run one pass. Returns how many items the pass handled.
    async fn run_once(&self) -> Result<usize, TaskError>;
}

/// Runs [`ScheduledTask`]s on a fixed interval.
pub struct Scheduler;

impl Scheduler {
    /// Call `task.run_once()` every `every`, starting immediately.
    ///
    /// A failed run is logged and the loop waits for the next tick. Returns
    /// when `cancel` is triggered. Ticks missed while a run overruns are
    /// delayed rather than bunched up.
    pub async fn run_every<T>(task: &T, every: Duration, cancel: CancellationToken)
    where
        T: ScheduledTask + ?Sized,
    {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            task = task.name(),
            interval_secs = every.as_secs(),
            "Scheduled task started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(task = task.name(), "Scheduled task cancelled");
                    break;
                }
                _ = interval.tick() => {
                    match task.run_once().await {
                        Ok(handled) => {
                            tracing::debug!(task = task.name(), handled, "Scheduled run finished");
                        }
                        Err(e) => {
                            tracing::error!(task = task.name(), error = %e, "Scheduled run failed");
                        }
                    }
                }
            }
        }
    }
}

//! Notification and email pipeline for the HRDC training backend.
//!
//! - [`dispatch`]: in-memory FIFO of training email jobs and the worker that
//!   drains it in paced, concurrent batches.
//! - [`notifier`]: persists in-app notifications and pushes them live.
//! - [`reminder`]: daily scan that reminds confirmed registrants.
//! - [`scheduler`]: fixed-interval driver for [`scheduler::ScheduledTask`]s.
//! - [`delivery`]: outbound mail transports (SMTP, log-only).
//! - [`store`]: ports onto persistence, with the Postgres adapter.
//! - [`live`]: the live-push capability the WebSocket layer provides.

pub mod delivery;
pub mod dispatch;
pub mod live;
pub mod notifier;
pub mod reminder;
pub mod scheduler;
pub mod store;
pub mod templates;

pub use delivery::email::{EmailConfig, EmailError, LogMailer, MailTransport, SmtpMailer};
pub use dispatch::{DispatchConfig, DispatchReport, EmailDispatcher, NotificationQueue};
pub use live::{LivePush, PushError};
pub use notifier::{NotificationWriter, NotifyError};
pub use reminder::{ReminderConfig, ReminderScanner, ScanState};
pub use scheduler::{ScheduledTask, Scheduler};
pub use store::{NotificationStore, PgStore, TrainingDirectory};

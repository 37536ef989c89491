//! Training email dispatch worker.
//!
//! Picks the mail transport from the environment and drains the shared
//! [`NotificationQueue`] until cancelled.

use std::sync::Arc;

use hrdc_events::{
    DispatchConfig, EmailConfig, EmailDispatcher, LogMailer, MailTransport, NotificationQueue,
    PgStore, SmtpMailer,
};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// SMTP when `SMTP_HOST` is set, otherwise a transport that only logs.
pub fn mailer_from_env() -> Arc<dyn MailTransport> {
    let Some(config) = EmailConfig::from_env() else {
        tracing::warn!("SMTP_HOST not set, training emails will only be logged");
        return Arc::new(LogMailer);
    };

    match SmtpMailer::new(&config) {
        Ok(mailer) => {
            tracing::info!(host = %config.smtp_host, port = config.smtp_port, "SMTP mailer configured");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid SMTP configuration, falling back to log mailer");
            Arc::new(LogMailer)
        }
    }
}

/// Run the email dispatcher until `cancel` is triggered.
pub async fn run(
    pool: PgPool,
    queue: Arc<NotificationQueue>,
    mailer: Arc<dyn MailTransport>,
    cancel: CancellationToken,
) {
    let dispatcher = EmailDispatcher::new(
        queue,
        Arc::new(PgStore::new(pool)),
        mailer,
        DispatchConfig::from_env(),
    );
    dispatcher.run(cancel).await;
}

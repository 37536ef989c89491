pub mod attendance;
pub mod certificate;
pub mod employee;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod training;

/// Today's date in UTC. All date-window rules compare against this.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

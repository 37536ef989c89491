//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or a transaction) as the first argument.

pub mod attendance_repo;
pub mod certificate_repo;
pub mod employee_repo;
pub mod feedback_repo;
pub mod notification_repo;
pub mod registration_repo;
pub mod training_repo;

pub use attendance_repo::AttendanceRepo;
pub use certificate_repo::CertificateRepo;
pub use employee_repo::EmployeeRepo;
pub use feedback_repo::FeedbackRepo;
pub use notification_repo::NotificationRepo;
pub use registration_repo::RegistrationRepo;
pub use training_repo::TrainingRepo;

//! Domain building blocks shared by every HRDC crate.
//!
//! Nothing in here performs I/O: id/timestamp aliases, the domain error
//! type, role names, the training eligibility matcher, and the small enums
//! that describe registration and notification state.

pub mod eligibility;
pub mod error;
pub mod notification;
pub mod registration;
pub mod roles;
pub mod training;
pub mod types;

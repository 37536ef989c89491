//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod attendance;
pub mod certificate;
pub mod employee;
pub mod feedback;
pub mod notification;
pub mod registration;
pub mod status;
pub mod training;

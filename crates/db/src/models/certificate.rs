//! Certificate model and DTOs.

use chrono::NaiveDate;
use hrdc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `certificates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Certificate {
    pub id: DbId,
    pub registration_id: DbId,
    pub is_generated: bool,
    pub issued_on: Option<NaiveDate>,
    pub file_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for generating (or regenerating) a certificate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateCertificate {
    /// Defaults to today.
    pub issued_on: Option<NaiveDate>,
    pub file_path: Option<String>,
}

//! Repository for the `certificates` table.

use chrono::NaiveDate;
use hrdc_core::types::DbId;
use sqlx::PgPool;

use crate::models::certificate::Certificate;

/// Column list for `certificates` queries.
const COLUMNS: &str =
    "id, registration_id, is_generated, issued_on, file_path, created_at, updated_at";

/// Provides upsert/read operations for certificates.
pub struct CertificateRepo;

impl CertificateRepo {
    /// Generate a certificate, overwriting any earlier one for the registration.
    pub async fn upsert_generated(
        pool: &PgPool,
        registration_id: DbId,
        issued_on: NaiveDate,
        file_path: Option<&str>,
    ) -> Result<Certificate, sqlx::Error> {
        let query = format!(
            "INSERT INTO certificates (registration_id, is_generated, issued_on, file_path)
             VALUES ($1, true, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_certificates_registration DO UPDATE SET
                is_generated = true,
                issued_on = EXCLUDED.issued_on,
                file_path = EXCLUDED.file_path,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Certificate>(&query)
            .bind(registration_id)
            .bind(issued_on)
            .bind(file_path)
            .fetch_one(pool)
            .await
    }

    /// Find the certificate for a registration, if any.
    pub async fn find_by_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Option<Certificate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM certificates WHERE registration_id = $1");
        sqlx::query_as::<_, Certificate>(&query)
            .bind(registration_id)
            .fetch_optional(pool)
            .await
    }
}

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Report;
use crate::db::queries;
use crate::error::AppError;
use crate::services::aggregation;

pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Generate and persist a revenue report over the owner's transactions
    /// created within `[start_date, end_date]` (date-only comparison,
    /// inclusive both ends). The stored `data` is a frozen snapshot; every
    /// call inserts a new row, so repeated identical calls create duplicate
    /// reports with distinct ids.
    pub async fn generate_revenue_report(
        &self,
        owner: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Report, AppError> {
        if start_date > end_date {
            return Err(AppError::Validation(
                "start_date must be on or before end_date".to_string(),
            ));
        }

        let transactions =
            queries::list_transactions_in_dates(&self.pool, owner, start_date, end_date)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let breakdown = aggregation::revenue_breakdown(&transactions);

        let now = Utc::now();
        let report = Report {
            id: Uuid::new_v4(),
            user_id: owner,
            title: format!("Revenue Report {} to {}", start_date, end_date),
            report_type: "revenue".to_string(),
            data: serde_json::to_value(&breakdown)
                .map_err(|e| AppError::Internal(e.to_string()))?,
            start_date,
            end_date,
            generated_at: now,
            updated_at: now,
        };

        let saved = queries::insert_report(&self.pool, &report)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::info!(
            "Generated revenue report {} for user {} ({} to {})",
            saved.id,
            owner,
            start_date,
            end_date
        );

        Ok(saved)
    }
}

use axum::{Json, extract::State, response::IntoResponse};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::AppState;
use crate::db::queries;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::services::aggregation::{self, DailyStat};

#[derive(Serialize)]
pub struct DailyStatsResponse {
    pub daily_stats: Vec<DailyStat>,
}

/// Totals over the caller's full history; the trailing-30-day revenue figure
/// inside the summary is computed against the current time.
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let transactions = queries::list_all_transactions(&state.db, user.id)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(aggregation::summarize(&transactions, Utc::now())))
}

/// Per-day figures for the trailing 7 calendar days, today first.
pub async fn stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();
    let transactions =
        queries::list_transactions_since(&state.db, user.id, now - Duration::days(7))
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(DailyStatsResponse {
        daily_stats: aggregation::daily_stats(&transactions, now),
    }))
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::db::queries;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::services::ReportService;

#[derive(Debug, Deserialize)]
pub struct GenerateRevenueReportPayload {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn generate_revenue_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<GenerateRevenueReportPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(start_date), Some(end_date)) = (payload.start_date, payload.end_date) else {
        return Err(AppError::Validation(
            "start_date and end_date required".to_string(),
        ));
    };

    let report = ReportService::new(state.db.clone())
        .generate_revenue_report(user.id, start_date, end_date)
        .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_reports(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(pagination): Query<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    let limit = pagination.limit.unwrap_or(20);
    let offset = pagination.offset.unwrap_or(0);

    let reports = queries::list_reports(&state.db, user.id, limit, offset)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(reports))
}

pub async fn get_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let report = queries::get_report(&state.db, user.id, id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Report {} not found", id)),
            _ => AppError::DatabaseError(e.to_string()),
        })?;

    Ok(Json(report))
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::db::{models::Transaction, queries};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct CreateTransactionPayload {
    pub amount: BigDecimal,
    pub currency: Option<String>,
    pub kind: String,
    pub payment_method: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
}

pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_positive_amount(&payload.amount)?;
    validation::validate_enum("kind", &payload.kind, validation::TRANSACTION_KINDS)?;

    let currency = validation::sanitize_string(payload.currency.as_deref().unwrap_or("USD"));
    validation::validate_required("currency", &currency)?;
    validation::validate_max_len("currency", &currency, validation::CURRENCY_MAX_LEN)?;

    let payment_method = validation::sanitize_string(&payload.payment_method);
    validation::validate_required("payment_method", &payment_method)?;
    validation::validate_max_len(
        "payment_method",
        &payment_method,
        validation::PAYMENT_METHOD_MAX_LEN,
    )?;

    let tx = Transaction::new(
        user.id,
        payload.amount,
        currency,
        payload.kind,
        payment_method,
        payload.description.unwrap_or_default(),
    );

    let inserted = queries::insert_transaction(&state.db, &tx)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<TransactionListParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = params.status.as_deref() {
        validation::validate_enum("status", status, validation::TRANSACTION_STATUSES)?;
    }

    let limit = params.limit.unwrap_or(50);
    let offset = params.offset.unwrap_or(0);

    let transactions =
        queries::list_transactions(&state.db, user.id, params.status.as_deref(), limit, offset)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(transactions))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tx = queries::get_transaction(&state.db, user.id, id)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Transaction {} not found", id)),
            _ => AppError::DatabaseError(e.to_string()),
        })?;

    Ok(Json(tx))
}

pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_enum("status", &payload.status, validation::TRANSACTION_STATUSES)?;

    let updated = queries::update_transaction_status(&state.db, user.id, id, &payload.status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound(format!("Transaction {} not found", id)),
            _ => AppError::DatabaseError(e.to_string()),
        })?;

    Ok(Json(updated))
}

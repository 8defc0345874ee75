use crate::db::models::{Report, Transaction, User};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Result};
use uuid::Uuid;

// --- User Queries ---

pub async fn insert_user(pool: &PgPool, user: &User) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (
            id, username, email, password_hash, api_key, role, phone, avatar, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.api_key)
    .bind(&user.role)
    .bind(&user.phone)
    .bind(&user.avatar)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn find_user_by_api_key(pool: &PgPool, api_key: &str) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE api_key = $1")
        .bind(api_key)
        .fetch_one(pool)
        .await
}

pub async fn update_user_profile(
    pool: &PgPool,
    id: Uuid,
    phone: Option<&str>,
    avatar: Option<&str>,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET phone = COALESCE($2, phone),
            avatar = COALESCE($3, avatar),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(phone)
    .bind(avatar)
    .fetch_one(pool)
    .await
}

// --- Transaction Queries ---
//
// Every query takes the owner id as an explicit bind; there is no unscoped
// variant, so cross-user reads cannot be expressed.

pub async fn insert_transaction(pool: &PgPool, tx: &Transaction) -> Result<Transaction> {
    sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (
            id, user_id, external_id, amount, currency, kind, status,
            payment_method, description, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(tx.id)
    .bind(tx.user_id)
    .bind(&tx.external_id)
    .bind(&tx.amount)
    .bind(&tx.currency)
    .bind(&tx.kind)
    .bind(&tx.status)
    .bind(&tx.payment_method)
    .bind(&tx.description)
    .bind(tx.created_at)
    .bind(tx.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn get_transaction(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Transaction> {
    sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .fetch_one(pool)
        .await
}

pub async fn list_transactions(
    pool: &PgPool,
    owner: Uuid,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE user_id = $1
        AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(owner)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn list_all_transactions(pool: &PgPool, owner: Uuid) -> Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn list_transactions_since(
    pool: &PgPool,
    owner: Uuid,
    since: DateTime<Utc>,
) -> Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE user_id = $1 AND created_at >= $2
        ORDER BY created_at DESC
        "#,
    )
    .bind(owner)
    .bind(since)
    .fetch_all(pool)
    .await
}

/// Date-only comparison, inclusive on both ends. Calendar days are taken in
/// UTC to match the aggregation engine's day boundaries.
pub async fn list_transactions_in_dates(
    pool: &PgPool,
    owner: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<Transaction>> {
    sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE user_id = $1
        AND (created_at AT TIME ZONE 'UTC')::date >= $2
        AND (created_at AT TIME ZONE 'UTC')::date <= $3
        ORDER BY created_at DESC
        "#,
    )
    .bind(owner)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await
}

pub async fn update_transaction_status(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    status: &str,
) -> Result<Transaction> {
    sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(owner)
    .bind(status)
    .fetch_one(pool)
    .await
}

// --- Report Queries ---

pub async fn insert_report(pool: &PgPool, report: &Report) -> Result<Report> {
    sqlx::query_as::<_, Report>(
        r#"
        INSERT INTO reports (
            id, user_id, title, report_type, data, start_date, end_date, generated_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(report.id)
    .bind(report.user_id)
    .bind(&report.title)
    .bind(&report.report_type)
    .bind(&report.data)
    .bind(report.start_date)
    .bind(report.end_date)
    .bind(report.generated_at)
    .bind(report.updated_at)
    .fetch_one(pool)
    .await
}

pub async fn get_report(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Report> {
    sqlx::query_as::<_, Report>("SELECT * FROM reports WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(owner)
        .fetch_one(pool)
        .await
}

pub async fn list_reports(
    pool: &PgPool,
    owner: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Report>> {
    sqlx::query_as::<_, Report>(
        r#"
        SELECT * FROM reports
        WHERE user_id = $1
        ORDER BY generated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(owner)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

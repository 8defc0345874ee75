use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account row. `password_hash` and `api_key` are never serialized in
/// responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub role: String,
    pub phone: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub external_id: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub kind: String,
    pub status: String,
    pub payment_method: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// `external_id` is assigned here, exactly once; it is never derived from
    /// mutable fields and never reused.
    pub fn new(
        user_id: Uuid,
        amount: BigDecimal,
        currency: String,
        kind: String,
        payment_method: String,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            external_id: Uuid::new_v4().to_string(),
            amount,
            currency,
            kind,
            status: "pending".to_string(),
            payment_method,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Point-in-time snapshot of an aggregation result. `data` never changes
/// after creation even if the underlying transactions do.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub report_type: String,
    pub data: serde_json::Value,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn new_transaction_starts_pending() {
        let tx = Transaction::new(
            Uuid::new_v4(),
            BigDecimal::from_str("100.50").unwrap(),
            "USD".to_string(),
            "purchase".to_string(),
            "card".to_string(),
            String::new(),
        );
        assert_eq!(tx.status, "pending");
        assert_eq!(tx.created_at, tx.updated_at);
    }

    #[test]
    fn external_ids_are_unique_per_transaction() {
        let owner = Uuid::new_v4();
        let a = Transaction::new(
            owner,
            BigDecimal::from(10),
            "USD".to_string(),
            "purchase".to_string(),
            "card".to_string(),
            String::new(),
        );
        let b = Transaction::new(
            owner,
            BigDecimal::from(10),
            "USD".to_string(),
            "purchase".to_string(),
            "card".to_string(),
            String::new(),
        );
        assert_ne!(a.external_id, b.external_id);
        assert_ne!(a.id, b.id);
    }
}

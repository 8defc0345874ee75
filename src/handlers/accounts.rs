use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::AppState;
use crate::db::{models::User, queries};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfilePayload {
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Salted SHA-256 digest stored as `salt$hexdigest`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{}${}", salt, hex::encode(hasher.finalize()))
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    let username = validation::sanitize_string(&payload.username);
    let email = validation::sanitize_string(&payload.email);

    validation::validate_required("username", &username)?;
    validation::validate_max_len("username", &username, validation::USERNAME_MAX_LEN)?;
    validation::validate_required("email", &email)?;
    validation::validate_required("password", &payload.password)?;

    let salt = Uuid::new_v4().simple().to_string();
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        username,
        email,
        password_hash: hash_password(&payload.password, &salt),
        api_key: Uuid::new_v4().to_string(),
        role: "user".to_string(),
        phone: String::new(),
        avatar: String::new(),
        created_at: now,
        updated_at: now,
    };

    let saved = queries::insert_user(&state.db, &user).await.map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Validation("username or email already taken".to_string())
        }
        _ => AppError::DatabaseError(e.to_string()),
    })?;

    tracing::info!("Registered user {} ({})", saved.username, saved.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            api_key: saved.api_key,
        }),
    ))
}

pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user)
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    let phone = payload.phone.as_deref().map(validation::sanitize_string);
    let avatar = payload.avatar.as_deref().map(validation::sanitize_string);

    let updated = queries::update_user_profile(&state.db, user.id, phone.as_deref(), avatar.as_deref())
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_for_same_salt() {
        assert_eq!(hash_password("hunter2", "salt"), hash_password("hunter2", "salt"));
    }

    #[test]
    fn hash_differs_across_salts_and_passwords() {
        assert_ne!(hash_password("hunter2", "a"), hash_password("hunter2", "b"));
        assert_ne!(hash_password("hunter2", "a"), hash_password("hunter3", "a"));
    }

    #[test]
    fn hash_embeds_salt_prefix() {
        let stored = hash_password("hunter2", "somesalt");
        assert!(stored.starts_with("somesalt$"));
    }
}

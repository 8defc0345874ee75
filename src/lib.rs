pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod validation;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::accounts::register))
        .route(
            "/accounts/me",
            get(handlers::accounts::me).put(handlers::accounts::update_profile),
        )
        .route(
            "/transactions",
            post(handlers::transactions::create_transaction)
                .get(handlers::transactions::list_transactions),
        )
        .route("/transactions/:id", get(handlers::transactions::get_transaction))
        .route("/transactions/:id/status", patch(handlers::transactions::update_status))
        .route("/dashboard/summary", get(handlers::dashboard::summary))
        .route("/dashboard/stats", get(handlers::dashboard::stats))
        .route("/reports", get(handlers::reports::list_reports))
        .route(
            "/reports/generate_revenue_report",
            post(handlers::reports::generate_revenue_report),
        )
        .route("/reports/:id", get(handlers::reports::get_report))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

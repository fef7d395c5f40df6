pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;
use actix_web::HttpResponse;

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthGate, AuthService, AuthenticatedUser};
pub use db::{DbOperations, Repository, UserStore};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub store: Arc<dyn Repository>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires the auth service to the same store the handlers use.
    pub fn with_store<S: Repository + 'static>(config: Settings, store: Arc<S>) -> Self {
        let users: Arc<dyn UserStore> = store.clone();
        let auth_service = AuthService::from_config(users, &config.auth);

        Self {
            config: Arc::new(config),
            store,
            auth_service: Arc::new(auth_service),
        }
    }
}

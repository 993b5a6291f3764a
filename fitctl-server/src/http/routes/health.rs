//! Readiness endpoint: answers 200 only while the store accepts queries

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health - round-trips `SELECT 1` through the pool
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let reachable = sqlx::query("SELECT 1").execute(&state.pool).await;

    let (status, body) = match reachable {
        Ok(_) => (
            StatusCode::OK,
            HealthResponse {
                status: "ok",
                database: "up",
                version: env!("CARGO_PKG_VERSION"),
            },
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse {
                    status: "unavailable",
                    database: "down",
                    version: env!("CARGO_PKG_VERSION"),
                },
            )
        }
    };

    (status, Json(body))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn reachable_store_is_ok() {
        let pool = create_memory_pool().await.unwrap();
        let state = Arc::new(AppState::new(pool));

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.database, "up");
    }

    #[tokio::test]
    async fn closed_pool_is_503() {
        let pool = create_memory_pool().await.unwrap();
        pool.close().await;
        let state = Arc::new(AppState::new(pool));

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "unavailable");
        assert_eq!(body.database, "down");
    }
}

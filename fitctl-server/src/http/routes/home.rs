//! Plain text banner at the root path

use axum::{routing::get, Router};

pub const BANNER: &str = "Gym Management Database";

/// GET /
async fn home() -> &'static str {
    BANNER
}

/// Home routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

//! fitctl-server: fitness center records over HTTP
//!
//! Tracks members and the workout sessions they schedule. Input is
//! validated in [`models`], persisted through the repositories in [`db`],
//! and exposed as JSON endpoints by [`http`].

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, FitctlConfig};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};

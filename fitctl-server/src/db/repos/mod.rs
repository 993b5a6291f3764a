//! Repository implementations for database access
//!
//! Each repository borrows the pool for the duration of one request and
//! maps rows to records with an explicit `from_row`.

pub mod members;
pub mod workouts;

pub use members::{Member, MemberRepo};
pub use workouts::{NamedWorkouts, WorkoutRepo, WorkoutSession};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

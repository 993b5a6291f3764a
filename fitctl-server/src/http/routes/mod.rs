//! Route handlers organized by resource

pub mod home;
pub mod health;
pub mod members;
pub mod workouts;

use serde::Serialize;

/// Confirmation body for mutations: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

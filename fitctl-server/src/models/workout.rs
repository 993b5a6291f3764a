//! Workout session input shape

use chrono::NaiveDate;
use serde_json::Value;

use super::{FieldReader, ValidationError};

const ACCEPTED: &[&str] = &["member_id", "session_date", "session_time", "activity"];

/// Validated workout session fields, used for both schedule and update.
///
/// `session_time` is free-form text ("6pm", "18:00-19:00"), only its type is
/// checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutInput {
    pub member_id: i64,
    pub session_date: NaiveDate,
    pub session_time: String,
    pub activity: String,
}

impl WorkoutInput {
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(payload);
        let member_id = reader.required_int("member_id");
        let session_date = reader.required_date("session_date");
        let session_time = reader.required_str("session_time");
        let activity = reader.required_str("activity");
        reader.finish(ACCEPTED)?;

        match (member_id, session_date, session_time, activity) {
            (Some(member_id), Some(session_date), Some(session_time), Some(activity)) => {
                Ok(Self {
                    member_id,
                    session_date,
                    session_time,
                    activity,
                })
            }
            _ => Err(ValidationError::invalid_input()),
        }
    }
}

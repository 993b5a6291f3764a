//! Member input shape

use serde_json::Value;

use super::{FieldReader, ValidationError};

/// Fields a client may send for a member. `id` is assigned by storage and
/// never accepted here.
const ACCEPTED: &[&str] = &["name", "age"];

/// Validated member fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    pub name: String,
    pub age: i64,
}

impl MemberInput {
    /// Validate an untyped JSON payload.
    ///
    /// # Example
    /// ```
    /// use fitctl_server::models::MemberInput;
    /// use serde_json::json;
    ///
    /// let input = MemberInput::from_json(&json!({"name": "Alice", "age": 30})).unwrap();
    /// assert_eq!(input.age, 30);
    /// assert!(MemberInput::from_json(&json!({"name": "Alice", "age": "old"})).is_err());
    /// ```
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(payload);
        let name = reader.required_str("name");
        let age = reader.required_int("age");
        reader.finish(ACCEPTED)?;

        match (name, age) {
            (Some(name), Some(age)) => Ok(Self { name, age }),
            // finish() reports a problem for every field that came back None
            _ => Err(ValidationError::invalid_input()),
        }
    }
}

//! Validation error types and the field reader used by every input shape

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const NOT_STRING: &str = "Not a valid string.";
pub const NOT_INTEGER: &str = "Not a valid integer.";
pub const NOT_DATE: &str = "Not a valid date.";
pub const UNKNOWN: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";

/// Key used for problems that concern the payload as a whole
pub const SCHEMA_KEY: &str = "_schema";

/// 2^63, the first float past `i64::MAX`. `i64::MAX as f64` rounds up to
/// this value, so it cannot serve as an inclusive bound.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Field name -> problem descriptions.
///
/// Serializes as a bare JSON object so it can be returned as a 400 body
/// as-is, e.g. `{"age": ["Not a valid integer."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error for a payload that is not a JSON object at all.
    pub fn invalid_input() -> Self {
        let mut err = Self::new();
        err.add(SCHEMA_KEY, INVALID_INPUT);
        err
    }

    pub fn add(&mut self, field: impl Into<String>, problem: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(problem.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Problems recorded for one field, if any.
    pub fn problems(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, problems) in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, problems.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Reads typed fields out of a JSON object, collecting problems instead of
/// stopping at the first one.
///
/// Each `required_*` call returns `None` when the field is unusable; the
/// problem is kept and reported by [`FieldReader::finish`].
pub struct FieldReader<'a> {
    object: Option<&'a Map<String, Value>>,
    errors: ValidationError,
}

impl<'a> FieldReader<'a> {
    pub fn new(payload: &'a Value) -> Self {
        match payload.as_object() {
            Some(object) => Self {
                object: Some(object),
                errors: ValidationError::new(),
            },
            None => Self {
                object: None,
                errors: ValidationError::invalid_input(),
            },
        }
    }

    fn present(&mut self, field: &'static str) -> Option<&'a Value> {
        let object = self.object?;
        match object.get(field) {
            None => {
                self.errors.add(field, MISSING);
                None
            }
            Some(Value::Null) => {
                self.errors.add(field, NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    pub fn required_str(&mut self, field: &'static str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.errors.add(field, NOT_STRING);
                None
            }
        }
    }

    /// Integers also accept integral floats and numeric strings.
    pub fn required_int(&mut self, field: &'static str) -> Option<i64> {
        let parsed = match self.present(field)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= -I64_END && *f < I64_END)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(field, NOT_INTEGER);
        }
        parsed
    }

    /// Calendar dates in strict ISO-8601 form: `YYYY-MM-DD`, zero-padded,
    /// no surrounding whitespace.
    pub fn required_date(&mut self, field: &'static str) -> Option<NaiveDate> {
        let parsed = match self.present(field)? {
            Value::String(s) if is_iso_date_shape(s) => {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
            }
            _ => None,
        };
        if parsed.is_none() {
            self.errors.add(field, NOT_DATE);
        }
        parsed
    }

    /// Flag keys outside `accepted` and return the collected problems.
    pub fn finish(mut self, accepted: &[&str]) -> Result<(), ValidationError> {
        if let Some(object) = self.object {
            for key in object.keys() {
                if !accepted.contains(&key.as_str()) {
                    self.errors.add(key.clone(), UNKNOWN);
                }
            }
        }

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_display() {
        let mut err = ValidationError::new();
        err.add("age", NOT_INTEGER);
        err.add("name", MISSING);
        assert_eq!(
            err.to_string(),
            "age: Not a valid integer.; name: Missing data for required field."
        );
    }

    #[test]
    fn serializes_as_field_map() {
        let mut err = ValidationError::new();
        err.add("activity", MISSING);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"activity": ["Missing data for required field."]})
        );
    }

    #[test]
    fn int_accepts_integral_forms() {
        let payload = json!({"a": 30, "b": 30.0, "c": "30", "d": " 7 "});
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_int("a"), Some(30));
        assert_eq!(reader.required_int("b"), Some(30));
        assert_eq!(reader.required_int("c"), Some(30));
        assert_eq!(reader.required_int("d"), Some(7));
        assert!(reader.finish(&["a", "b", "c", "d"]).is_ok());
    }

    #[test]
    fn int_rejects_fractions_bools_and_words() {
        let payload = json!({"a": 30.5, "b": true, "c": "thirty"});
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_int("a"), None);
        assert_eq!(reader.required_int("b"), None);
        assert_eq!(reader.required_int("c"), None);

        let err = reader.finish(&["a", "b", "c"]).unwrap_err();
        for field in ["a", "b", "c"] {
            assert_eq!(err.problems(field), Some(&[NOT_INTEGER.to_string()][..]));
        }
    }

    #[test]
    fn int_rejects_values_past_i64() {
        let payload: Value = serde_json::from_str(
            r#"{"a": 9223372036854775808, "b": 9223372036854775807.0, "c": -1e19, "d": -9223372036854775808}"#,
        )
        .unwrap();
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_int("a"), None);
        assert_eq!(reader.required_int("b"), None);
        assert_eq!(reader.required_int("c"), None);
        assert_eq!(reader.required_int("d"), Some(i64::MIN));

        let err = reader.finish(&["a", "b", "c", "d"]).unwrap_err();
        assert_eq!(err.problems("a"), Some(&[NOT_INTEGER.to_string()][..]));
        assert_eq!(err.problems("b"), Some(&[NOT_INTEGER.to_string()][..]));
        assert!(err.problems("d").is_none());
    }

    #[test]
    fn null_and_missing_are_distinct() {
        let payload = json!({"name": null});
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_str("name"), None);
        assert_eq!(reader.required_str("activity"), None);

        let err = reader.finish(&["name", "activity"]).unwrap_err();
        assert_eq!(err.problems("name"), Some(&[NULL.to_string()][..]));
        assert_eq!(err.problems("activity"), Some(&[MISSING.to_string()][..]));
    }

    #[test]
    fn dates_must_be_iso() {
        let payload = json!({"ok": "2024-03-01", "bad": "03/01/2024", "num": 20240301});
        let mut reader = FieldReader::new(&payload);
        assert_eq!(
            reader.required_date("ok"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(reader.required_date("bad"), None);
        assert_eq!(reader.required_date("num"), None);

        let err = reader.finish(&["ok", "bad", "num"]).unwrap_err();
        assert!(err.problems("ok").is_none());
        assert_eq!(err.problems("bad"), Some(&[NOT_DATE.to_string()][..]));
    }

    #[test]
    fn dates_must_be_padded_and_untrimmed() {
        let payload = json!({"short": "2024-3-1", "spaced": " 2024-03-01 ", "ok": "2024-03-01"});
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_date("short"), None);
        assert_eq!(reader.required_date("spaced"), None);
        assert!(reader.required_date("ok").is_some());

        let err = reader.finish(&["short", "spaced", "ok"]).unwrap_err();
        assert_eq!(err.problems("short"), Some(&[NOT_DATE.to_string()][..]));
        assert_eq!(err.problems("spaced"), Some(&[NOT_DATE.to_string()][..]));
    }

    #[test]
    fn unknown_keys_are_reported() {
        let payload = json!({"name": "Alice", "id": 4});
        let mut reader = FieldReader::new(&payload);
        assert!(reader.required_str("name").is_some());

        let err = reader.finish(&["name"]).unwrap_err();
        assert_eq!(err.problems("id"), Some(&[UNKNOWN.to_string()][..]));
    }

    #[test]
    fn non_object_payload() {
        let payload = json!(["name", "age"]);
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.required_str("name"), None);

        let err = reader.finish(&["name"]).unwrap_err();
        assert_eq!(err, ValidationError::invalid_input());
    }
}

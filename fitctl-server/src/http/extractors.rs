//! Custom Axum extractors

use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::ApiError;

/// Extract a record id from the path.
///
/// Only plain digit strings name a record. Anything else, signs included,
/// answers 404 rather than a parse error.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "record",
                id: String::new(),
            })?;

        match parse_id(&raw) {
            Some(id) => Ok(Self(id)),
            None => Err(ApiError::NotFound {
                resource: "record",
                id: raw,
            }),
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Extract the request body as untyped JSON.
///
/// Never rejects: a body that is missing or not JSON becomes `Value::Null`,
/// which the model layer reports as an invalid payload. Handlers can then
/// run their record lookup before any body problem is reported.
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Bytes::from_request(req, state).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
            Err(e) => {
                tracing::debug!("unreadable request body: {}", e);
                Value::Null
            }
        };

        Ok(Self(value))
    }
}

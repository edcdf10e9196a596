//! Custom Axum extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value as JsonValue;

use crate::Error;

/// JSON request body that rejects with the API's own error shape.
///
/// Accepts `application/json`, any `+json` media type and a missing
/// content type. Anything else is rejected before the body is read.
pub struct JsonBody(pub JsonValue);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        // Extract just the media type (before any ;charset= etc.)
        let media_type = content_type.split(';').next().unwrap_or("").trim();
        if !(media_type.is_empty()
            || media_type == "application/json"
            || media_type.ends_with("+json"))
        {
            return Err(Error::Validation(format!(
                "Unsupported content type '{media_type}', expected application/json"
            )));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| Error::Validation(format!("Failed to read request body: {e}")))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::Validation(format!("Invalid JSON in request body: {e}")))?;

        Ok(JsonBody(value))
    }
}

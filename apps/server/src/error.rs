//! Error types for the API server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {entity}/{id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("No route for {0}")]
    RouteNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    #[error("Unknown filter operator '{0}'")]
    UnknownOperator(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.to_string())
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } | Error::UnknownCollection(_) | Error::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Error::Validation(_) | Error::UnknownField { .. } | Error::UnknownOperator(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Internal(_) | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } | Error::UnknownCollection(_) | Error::RouteNotFound(_) => {
                "not-found"
            }
            Error::Validation(_) => "invalid",
            Error::UnknownField { .. } => "unknown-field",
            Error::UnknownOperator(_) => "unknown-operator",
            Error::Internal(_) | Error::Other(_) => "exception",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({
            "error": {
                "status": status.as_u16(),
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_are_client_errors() {
        let err = Error::UnknownField {
            entity: "probes",
            field: "colour".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "unknown-field");
        assert_eq!(err.to_string(), "Unknown field 'colour' for probes");

        assert_eq!(
            Error::UnknownOperator("like".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_are_masked() {
        let response = Error::Internal("lock poisoned".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

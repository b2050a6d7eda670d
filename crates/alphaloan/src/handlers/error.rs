//! api error handling for http handlers.
//!
//! every failure is reported as the uniform `{error_message, data}` envelope
//! with a fixed human-readable message per failure class. internal detail is
//! logged server-side, never sent to the client.

use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// api error type for handler responses.
#[derive(Debug)]
pub enum ApiError {
    /// malformed or missing input (400).
    BadRequest(String),
    /// no matching row (404).
    NotFound(String),
    /// storage or other unclassified failure (500).
    Internal(String),
}

impl ApiError {
    /// create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// create an internal server error with a fixed client-facing message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// the uniform error envelope: `error_message` set, `data` null.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error_message: Option<String>,
    data: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = ErrorEnvelope {
            error_message: Some(message),
            data: None,
        };
        (status, Json(body)).into_response()
    }
}

/// json body extractor whose rejection is the envelope-shaped [`ApiError`]
/// instead of axum's plain-text default.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(detail = %rejection.body_text(), "rejecting malformed request body");
                Err(ApiError::bad_request("Bad request body"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_envelope_shape() {
        let response = ApiError::not_found("Customer not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error_message"], "Customer not found");
        assert!(value["data"].is_null());
    }

    #[tokio::test]
    async fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::internal("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

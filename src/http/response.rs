//! API error responses.
//!
//! # Responsibilities
//! - Map domain failures to HTTP statuses and the `{ "detail": ... }` body
//! - Hand failure details to the request interceptor via a response
//!   extension

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::logging::error_chain;
use crate::suppression::SuppressionError;

/// Error payload shape returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Failure details the request interceptor reads back off the response.
#[derive(Debug, Clone)]
pub struct FailureDetail {
    /// The failure's display message.
    pub message: String,
    /// Rendered source chain.
    pub detail: String,
}

/// Failures surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("Email delivery API error: {0}")]
    Upstream(#[source] SuppressionError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SuppressionError> for ApiError {
    fn from(err: SuppressionError) -> Self {
        match err {
            SuppressionError::NotSuppressed { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let failure = FailureDetail {
            message: self.to_string(),
            detail: error_chain(&self),
        };
        let mut response = (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response();
        response.extensions_mut().insert(failure);
        response
    }
}

#[cfg(test)]
mod tests {
    use crate::suppression::ProviderError;

    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response =
            ApiError::NotFound("Email 'a@b.com' is not in the suppression list".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<FailureDetail>().is_some());
    }

    #[test]
    fn test_upstream_maps_to_500_with_chain_detail() {
        let err = ApiError::from(SuppressionError::Provider {
            context: "Failed to check suppression for a@b.com".to_string(),
            source: ProviderError::Service {
                status: 500,
                code: "InternalError".to_string(),
                message: "boom".to_string(),
            },
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let failure = response.extensions().get::<FailureDetail>().unwrap();
        assert!(failure.message.contains("boom"));
        assert!(failure.detail.contains("caused by:"));
    }

    #[test]
    fn test_not_suppressed_converts_to_not_found() {
        let err = ApiError::from(SuppressionError::NotSuppressed {
            email: "a@b.com".to_string(),
        });
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}

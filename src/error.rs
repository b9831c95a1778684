use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use spendlog_core::StorageError;
use thiserror::Error;

use crate::validation::ValidationError;

pub const ALLOWED_METHODS: &str = "GET, POST";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON body.")]
    InvalidJson,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Method {0} Not Allowed")]
    MethodNotAllowed(Method),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage(_) | ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidJson => {
                metrics::increment_counter!("spendlog_expenses_rejected_total", "reason" => "invalid_json");
                self.to_string()
            }
            ApiError::Validation(e) => {
                tracing::debug!(error = %e, "Expense rejected");
                metrics::increment_counter!("spendlog_expenses_rejected_total", "reason" => e.reason());
                self.to_string()
            }
            ApiError::MethodNotAllowed(_) => {
                metrics::increment_counter!("spendlog_requests_method_not_allowed_total");
                self.to_string()
            }
            ApiError::Storage(_) | ApiError::Serialization(_) => {
                tracing::error!(error = %self, "Request failed");
                "Internal Server Error".to_string()
            }
        };

        let body = Json(ErrorBody {
            success: false,
            error: message,
        });

        match self {
            ApiError::MethodNotAllowed(_) => {
                (status, [(header::ALLOW, ALLOWED_METHODS)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::InvalidJson.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(ValidationError::InvalidAmount).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MethodNotAllowed(Method::PUT).status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::from(StorageError::LockPoisoned).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed(Method::DELETE).into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, POST");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ApiError::from(ValidationError::MissingField("amount"));
        assert_eq!(err.to_string(), "Missing required field: 'amount'");
    }
}

//! API error handling
//!
//! Errors are rendered in the same envelope as successful responses, with
//! `status: "error"` and no `data`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ci_core::error::{CiError, ValidationErrors};
use tracing::error;

use crate::representers::Envelope;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, key: String },
    Validation(ValidationErrors),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound { resource, key } => format!("{} {} not found", resource, key),
            ApiError::Validation(errors) => errors.full_messages().join(", "),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<CiError> for ApiError {
    fn from(err: CiError) -> Self {
        match err {
            CiError::NotFound { entity, key } => ApiError::NotFound {
                resource: entity,
                key,
            },
            CiError::Validation(errors) => ApiError::Validation(errors),
            other => {
                error!(code = other.error_code(), error = %other, "Request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(Envelope::error(self.message()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ci_core::DecodeError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(CiError::customer_not_found(1)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CiError::invalid("quota exceeded")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CiError::Store("connection reset".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_exposed() {
        let decode: DecodeError = ci_core::encoding::decode("@@").unwrap_err();
        let err = ApiError::from(CiError::Decode(decode));

        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn test_messages() {
        let err = ApiError::from(CiError::invalid("only 2 more allowed"));
        assert_eq!(err.message(), "only 2 more allowed");

        let err = ApiError::from(CiError::customer_not_found(12));
        assert_eq!(err.message(), "Customer id=12 not found");
    }
}

//! Response envelope
//!
//! Every JSON response is `{"status": "success"|"error", "message": ..., "data": ...}`
//! with `data` omitted when there is no payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Uniform JSON envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success without a payload
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = match self.status {
            EnvelopeStatus::Success => StatusCode::OK,
            EnvelopeStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serialization() {
        let envelope = Envelope::success("Customer retrieved", json!({"id": 1}));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": "success", "message": "Customer retrieved", "data": {"id": 1}})
        );
    }

    #[test]
    fn test_data_omitted_when_absent() {
        let value = serde_json::to_value(Envelope::done("Images deleted")).unwrap();
        assert_eq!(value, json!({"status": "success", "message": "Images deleted"}));

        let value = serde_json::to_value(Envelope::error("quota exceeded")).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value.get("data").is_none());
    }
}

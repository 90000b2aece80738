//! Core error types for Customer Images
//!
//! Every failure an aggregate operation can report maps onto one of these variants.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::encoding::DecodeError;

/// Core error type for all Customer Images operations
#[derive(Error, Debug)]
pub enum CiError {
    #[error("Not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Stored image data is corrupt: {0}")]
    Decode(#[from] DecodeError),

    #[error("Store error: {0}")]
    Store(String),
}

impl CiError {
    pub fn customer_not_found(id: crate::Id) -> Self {
        CiError::NotFound {
            entity: "Customer",
            key: format!("id={}", id),
        }
    }

    pub fn image_not_found(customer_id: crate::Id, image_id: crate::Id) -> Self {
        CiError::NotFound {
            entity: "Image",
            key: format!("id={} for customer id={}", image_id, customer_id),
        }
    }

    /// Single base-level validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        CiError::Validation(errors)
    }
}

/// Validation errors collection
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("{}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    /// Base messages first, then "<field> <message>" in field order
    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

/// HTTP status code mapping for errors
impl CiError {
    pub fn status_code(&self) -> u16 {
        match self {
            CiError::NotFound { .. } => 404,
            CiError::Validation(_) => 400,
            CiError::Decode(_) | CiError::Store(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CiError::NotFound { .. } => "not_found",
            CiError::Validation(_) => "validation_failed",
            CiError::Decode(_) => "decode_error",
            CiError::Store(_) => "store_error",
        }
    }

    /// Whether the failure is the caller's fault
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages_order() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "required");
        errors.add_base("quota exceeded");

        assert_eq!(errors.full_messages(), vec!["quota exceeded", "name required"]);
        assert_eq!(errors.to_string(), "quota exceeded, name required");
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::new();
        a.add("name", "required");
        let mut b = ValidationErrors::new();
        b.add("name", "is too long (maximum is 200 characters)");
        b.add_base("quota exceeded");

        a.merge(b);
        assert_eq!(a.get("name").map(Vec::len), Some(2));
        assert_eq!(a.base_errors.len(), 1);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CiError::customer_not_found(7).status_code(), 404);
        assert_eq!(CiError::invalid("quota exceeded").status_code(), 400);
        assert_eq!(CiError::Store("connection reset".into()).status_code(), 500);
        assert!(CiError::image_not_found(1, 2).is_client_error());
        assert!(!CiError::Store("boom".into()).is_client_error());
    }

    #[test]
    fn test_invalid_message() {
        let err = CiError::invalid("only 2 more allowed");
        match err {
            CiError::Validation(errors) => {
                assert_eq!(errors.full_messages(), vec!["only 2 more allowed"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

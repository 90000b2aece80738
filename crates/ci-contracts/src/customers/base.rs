//! Base contract for customers

use ci_core::error::ValidationErrors;
use ci_models::customer::NAME_MAX_LENGTH;

use crate::base::{into_result, Contract, ValidationResult};

/// Customer data for validation
pub trait CustomerData: Send + Sync {
    fn name(&self) -> &str;
}

impl CustomerData for str {
    fn name(&self) -> &str {
        self
    }
}

impl CustomerData for String {
    fn name(&self) -> &str {
        self
    }
}

/// Validations shared by every customer write
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomerBaseContract;

impl CustomerBaseContract {
    pub fn new() -> Self {
        Self
    }

    /// Name must be present once trimmed and fit the column
    pub fn validate_name(&self, name: &str, errors: &mut ValidationErrors) {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            errors.add("name", "required");
        } else if trimmed.chars().count() > NAME_MAX_LENGTH {
            errors.add(
                "name",
                format!("is too long (maximum is {} characters)", NAME_MAX_LENGTH),
            );
        }
    }
}

impl<T: CustomerData + ?Sized> Contract<T> for CustomerBaseContract {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        self.validate_name(entity.name(), &mut errors);
        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(CustomerBaseContract::new().validate("Ada Lovelace").is_ok());
    }

    #[test]
    fn test_blank_name() {
        for name in ["", "   ", "\t\n"] {
            let errors = CustomerBaseContract::new().validate(name).unwrap_err();
            assert_eq!(errors.full_messages(), vec!["name required"]);
        }
    }

    #[test]
    fn test_name_length_counts_characters() {
        let at_limit = "é".repeat(NAME_MAX_LENGTH);
        assert!(CustomerBaseContract::new().validate(at_limit.as_str()).is_ok());

        let too_long = "x".repeat(NAME_MAX_LENGTH + 1);
        let errors = CustomerBaseContract::new()
            .validate(too_long.as_str())
            .unwrap_err();
        assert!(errors.has_error("name"));
    }

    #[test]
    fn test_surrounding_whitespace_not_counted() {
        let padded = format!("  {}  ", "x".repeat(NAME_MAX_LENGTH));
        assert!(CustomerBaseContract::new().validate(padded.as_str()).is_ok());
    }
}

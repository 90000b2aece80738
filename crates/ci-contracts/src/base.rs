//! Base contract system

use ci_core::error::ValidationErrors;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T: ?Sized>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Turn collected errors into a validation result
pub fn into_result(errors: ValidationErrors) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert!(into_result(ValidationErrors::new()).is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("name", "required");
        assert!(into_result(errors).is_err());
    }
}

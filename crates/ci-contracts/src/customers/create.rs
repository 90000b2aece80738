//! Create contract for customers

use ci_core::error::ValidationErrors;

use super::base::{CustomerBaseContract, CustomerData};
use crate::base::{into_result, Contract, ValidationResult};
use crate::images::ImageBatchContract;

/// Customer data plus the size of the initial image batch
pub trait CreateCustomerData: CustomerData {
    fn image_count(&self) -> usize;
}

/// Contract for creating a customer with its initial images
#[derive(Debug, Default, Clone, Copy)]
pub struct CreateCustomerContract {
    base: CustomerBaseContract,
    images: ImageBatchContract,
}

impl CreateCustomerContract {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: CreateCustomerData> Contract<T> for CreateCustomerContract {
    fn validate(&self, entity: &T) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        if let Err(base_errors) = self.base.validate(entity) {
            errors.merge(base_errors);
        }
        if let Err(batch_errors) = self.images.validate(&entity.image_count()) {
            errors.merge(batch_errors);
        }

        into_result(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NewCustomer {
        name: String,
        files: usize,
    }

    impl CustomerData for NewCustomer {
        fn name(&self) -> &str {
            &self.name
        }
    }

    impl CreateCustomerData for NewCustomer {
        fn image_count(&self) -> usize {
            self.files
        }
    }

    #[test]
    fn test_valid_create() {
        let input = NewCustomer { name: "Ada".into(), files: 10 };
        assert!(CreateCustomerContract::new().validate(&input).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let input = NewCustomer { name: " ".into(), files: 11 };
        let errors = CreateCustomerContract::new().validate(&input).unwrap_err();

        assert_eq!(
            errors.full_messages(),
            vec!["quota exceeded", "name required"]
        );
    }
}

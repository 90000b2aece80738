//! Image batch contract

use ci_core::error::ValidationErrors;
use ci_models::quota;

use crate::base::{into_result, Contract, ValidationResult};

/// Rejects a batch that could never fit in one customer's collection
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageBatchContract;

impl ImageBatchContract {
    pub fn new() -> Self {
        Self
    }
}

impl Contract<usize> for ImageBatchContract {
    fn validate(&self, batch_len: &usize) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        if let Err(violation) = quota::check_batch(*batch_len) {
            errors.add_base(violation.to_string());
        }
        into_result(errors)
    }
}

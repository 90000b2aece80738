//! # ci-contracts
//!
//! Contract validation for Customer Images.
//!
//! Contracts validate input before the aggregate touches the store and
//! collect every problem into one `ValidationErrors`.

pub mod base;
pub mod customers;
pub mod images;

pub use base::*;
pub use customers::{CreateCustomerContract, CreateCustomerData, CustomerBaseContract, CustomerData};
pub use images::ImageBatchContract;

//! Customer contracts

pub mod base;
pub mod create;

pub use base::{CustomerBaseContract, CustomerData};
pub use create::{CreateCustomerContract, CreateCustomerData};

//! API request handlers

pub mod customers;
pub mod images;

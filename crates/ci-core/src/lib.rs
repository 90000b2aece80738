//! # ci-core
//!
//! Core types, traits, and utilities for Customer Images.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types
//! - Result type alias
//! - Identifier type
//! - Binary-to-text encoding of image payloads
//! - Configuration types

pub mod config;
pub mod encoding;
pub mod error;
pub mod result;
pub mod traits;

pub use encoding::DecodeError;
pub use error::*;
pub use result::*;
pub use traits::*;

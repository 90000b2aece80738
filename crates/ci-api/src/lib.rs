//! # ci-api
//!
//! REST handlers for Customer Images.
//!
//! Parses multipart requests into service inputs and renders every JSON
//! result in the `{status, message, data}` envelope.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod representers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;

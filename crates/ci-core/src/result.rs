//! Result type aliases

use crate::error::CiError;

/// Standard Result type for Customer Images operations
pub type CiResult<T> = Result<T, CiError>;

//! # ci-db
//!
//! PostgreSQL persistence for Customer Images.
//!
//! - Connection pool management and embedded migrations
//! - `PgCustomerStore`, the transactional `CustomerStore` implementation
//!
//! ## Example
//!
//! ```ignore
//! use ci_db::{Database, DatabaseConfig, PgCustomerStore};
//! use ci_attachments::CustomerImageService;
//! use std::sync::Arc;
//!
//! let db = Database::connect(&DatabaseConfig::from_env()).await?;
//! db.migrate().await?;
//!
//! let service = CustomerImageService::new(Arc::new(PgCustomerStore::new(db.pool().clone())));
//! ```

pub mod customers;
pub mod pool;
pub mod repository;

// Re-exports
pub use customers::{CustomerRow, ImageRow, PgCustomerStore};
pub use pool::{Database, DatabaseConfig, PoolStats};
pub use repository::{RepositoryError, RepositoryResult};

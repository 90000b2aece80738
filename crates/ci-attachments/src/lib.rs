//! # ci-attachments
//!
//! The customer image aggregate.
//!
//! ## Features
//!
//! - `CustomerStore`: the persistence seam; every mutation is one atomic step
//! - `MemoryCustomerStore`: in-process store for tests and local runs
//! - `CustomerImageService`: validation, encoding and the quota-enforcing operations
//!
//! ## Example
//!
//! ```rust,ignore
//! use ci_attachments::{CustomerImageService, ImageUpload, MemoryCustomerStore};
//! use std::sync::Arc;
//!
//! let service = CustomerImageService::new(Arc::new(MemoryCustomerStore::new()));
//!
//! let customer = service
//!     .create_customer("Ada", vec![ImageUpload::new(png_bytes).filename("ada.png")])
//!     .await?;
//! let count = service.count_images(customer.id).await?;
//! ```

pub mod service;
pub mod store;
pub mod upload;

pub use service::{CustomerImageService, ImageContent};
pub use store::{CustomerStore, MemoryCustomerStore, StoreError, StoreResult};
pub use upload::ImageUpload;

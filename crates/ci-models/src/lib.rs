//! # ci-models
//!
//! Domain models for Customer Images.
//!
//! A `Customer` owns its `Image`s by value; an image only carries the
//! integer id of its owner. The quota rule that bounds the collection
//! lives in [`quota`].

pub use ci_core::traits::Id;

pub mod customer;
pub mod image;
pub mod quota;

pub use customer::Customer;
pub use image::{Image, NewImage};
pub use quota::{check_quota, ImageMutation, QuotaViolation, MAX_IMAGES_PER_CUSTOMER};

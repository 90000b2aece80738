//! Response representers

pub mod customer;
pub mod envelope;

pub use customer::ImageCountRepresenter;
pub use envelope::{Envelope, EnvelopeStatus};

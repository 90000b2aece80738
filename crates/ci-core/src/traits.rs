//! Identifier type shared by the domain entities

/// Primary key type (BIGSERIAL in the store)
pub type Id = i64;

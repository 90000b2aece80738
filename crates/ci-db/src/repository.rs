//! Repository errors

use ci_attachments::StoreError;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_backend_store_error() {
        let err: StoreError = RepositoryError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, StoreError::Backend(ref message) if message.starts_with("Database error")));

        let err: StoreError = RepositoryError::InvalidRow("negative count".into()).into();
        assert_eq!(err.to_string(), "Store backend error: Invalid row: negative count");
    }
}

/// Errors that can occur within the storage layer.
///
/// # Examples
///
/// ```rust
/// use zonecheck_storage::error::StorageError;
///
/// let err = StorageError::NotFound {
///     entity: "dns_check",
///     id: 42,
/// };
/// assert!(err.to_string().contains("dns_check"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A required record was not found in the database.
    #[error("Storage: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: i32 },

    /// An insert operation did not return the newly created row, which should be
    /// unreachable under normal conditions.
    #[error("Storage: insert of {entity} succeeded but the row could not be read back")]
    InsertReadback { entity: &'static str },

    /// An underlying database error reported by SeaORM.
    #[error("Storage: database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

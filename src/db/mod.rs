//! Database layer (JSON record files).

pub mod profiles;
pub mod store;
pub mod users;

pub use profiles::ProfileStore;
pub use store::JsonFile;
pub use users::UserStore;

/// Errors from the record stores. Missing records are not errors; lookups
/// return `None` and deletes return `false`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Duplicate(String),

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Record file {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Failed to serialize records: {0}")]
    Serialize(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

use saver_domain::{ItemId, ItemKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("{kind} item not found: {id}")]
    ItemNotFound { kind: ItemKind, id: ItemId },
    #[error("Stored `{key}` could not be decoded: {reason}")]
    StorageDecode { key: String, reason: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::ItemNotFound { .. })
    }
}

//! Error taxonomy shared by the record store and the photo store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// Missing or invalid required input.
    #[error("{0}")]
    Validation(String),
    /// Unknown record id, or a record whose photo is missing.
    #[error("{0}")]
    NotFound(String),
    /// Disk write/delete failure in the upload directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        InventoryError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        InventoryError::NotFound(msg.into())
    }

    pub fn record_not_found(id: u64) -> Self {
        InventoryError::NotFound(format!("Inventory item with id {} not found", id))
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

//! Inventory domain: records, the in-memory store and search.

pub mod error;
pub mod inventory;

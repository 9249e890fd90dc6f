pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::inventory_service::InventoryService;
pub use domain::error::{InventoryError, InventoryResult};
pub use storage::photos::PhotoStore;

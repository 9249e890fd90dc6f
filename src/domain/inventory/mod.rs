pub mod record;
pub mod search;
pub mod store;

pub use record::{InventoryRecord, PhotoAsset, RecordLookup, RecordPatch, RecordSummary};
pub use search::SearchCriteria;
pub use store::RecordStore;

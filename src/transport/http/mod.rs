pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod forms;
    pub mod health;
    pub mod inventory;
    pub mod photos;
    pub mod search;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;

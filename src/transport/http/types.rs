use crate::app::inventory_service::InventoryService;
use crate::domain::inventory::{
    InventoryRecord, RecordLookup, RecordPatch, RecordSummary, SearchCriteria,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<InventoryService>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: impl Serialize) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: serde_json::to_value(data).ok(),
            error: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            count: None,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Full inventory item as returned by create/get/update/photo-replace.
#[derive(Serialize, Debug, ToSchema)]
pub struct InventoryItem {
    pub id: u64,
    pub inventory_name: String,
    pub description: String,
    /// Generated storage name of the photo file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_filename: Option<String>,
    /// Content type the photo was uploaded with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_mimetype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<&InventoryRecord> for InventoryItem {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            id: record.id,
            inventory_name: record.inventory_name.clone(),
            description: record.description.clone(),
            photo_filename: record.photo.as_ref().map(|p| p.filename.clone()),
            photo_mimetype: record.photo.as_ref().map(|p| p.mimetype.clone()),
            photo_url: record.photo_url(),
        }
    }
}

/// List / search row. `photo_url` is `"No photo"` when the item has none.
#[derive(Serialize, Debug, ToSchema)]
pub struct InventorySummary {
    pub id: u64,
    pub inventory_name: String,
    pub photo_url: String,
}

impl From<RecordSummary> for InventorySummary {
    fn from(s: RecordSummary) -> Self {
        Self {
            id: s.id,
            inventory_name: s.inventory_name,
            photo_url: s.photo_url,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct InventoryLookup {
    pub id: u64,
    pub inventory_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<RecordLookup> for InventoryLookup {
    fn from(l: RecordLookup) -> Self {
        Self {
            id: l.id,
            inventory_name: l.inventory_name,
            description: l.description,
            photo_url: l.photo_url,
        }
    }
}

/// Multipart body of `POST /register` (documentation only; parsed field by field).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct RegisterForm {
    pub inventory_name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub photo: Option<Vec<u8>>,
}

/// Multipart body of `PUT /inventory/{id}/photo` (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct PhotoForm {
    #[schema(value_type = String, format = Binary)]
    pub photo: Vec<u8>,
}

/// Partial update. Empty strings are accepted and ignored.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdateInventoryRequest {
    #[serde(default)]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateInventoryRequest> for RecordPatch {
    fn from(r: UpdateInventoryRequest) -> Self {
        RecordPatch {
            inventory_name: r.inventory_name,
            description: r.description,
        }
    }
}

/// Criteria search. At least one non-empty field is required; any match is enough.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct SearchRequest {
    #[serde(default)]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Matched against the stored photo filename.
    #[serde(default)]
    pub photo_name: Option<String>,
}

impl From<SearchRequest> for SearchCriteria {
    fn from(r: SearchRequest) -> Self {
        SearchCriteria {
            inventory_name: r.inventory_name,
            description: r.description,
            photo_name: r.photo_name,
        }
    }
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindByIdQuery {
    /// Item id.
    pub id: Option<String>,
    /// `on` to include `photo_url` in the result.
    #[serde(rename = "includePhoto")]
    pub include_photo: Option<String>,
}

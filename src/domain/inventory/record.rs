//! Inventory records and the views derived from them.

use serde::Deserialize;

/// Stored when a record is registered without a description.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Reported as `photo_url` in list/search summaries for records without a photo.
pub const NO_PHOTO_PLACEHOLDER: &str = "No photo";

/// Relative URL of the photo endpoint for a record.
pub fn photo_url(id: u64) -> String {
    format!("/inventory/{}/photo", id)
}

/// The single stored file bound to a record.
///
/// Filename and mimetype live together so a record can never carry one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    /// Generated storage name inside the upload directory.
    pub filename: String,
    /// Content type declared by the client at upload time.
    pub mimetype: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub id: u64,
    pub inventory_name: String,
    pub description: String,
    pub photo: Option<PhotoAsset>,
}

impl InventoryRecord {
    pub fn photo_url(&self) -> Option<String> {
        self.photo.as_ref().map(|_| photo_url(self.id))
    }

    pub fn photo_filename(&self) -> Option<&str> {
        self.photo.as_ref().map(|p| p.filename.as_str())
    }

    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            id: self.id,
            inventory_name: self.inventory_name.clone(),
            photo_url: self
                .photo_url()
                .unwrap_or_else(|| NO_PHOTO_PLACEHOLDER.to_string()),
        }
    }

    pub fn lookup(&self, include_photo: bool) -> RecordLookup {
        RecordLookup {
            id: self.id,
            inventory_name: self.inventory_name.clone(),
            description: self.description.clone(),
            photo_url: if include_photo { self.photo_url() } else { None },
        }
    }
}

/// One row of the list and criteria-search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: u64,
    pub inventory_name: String,
    pub photo_url: String,
}

/// Result of a lookup by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLookup {
    pub id: u64,
    pub inventory_name: String,
    pub description: String,
    pub photo_url: Option<String>,
}

/// Partial update of a record's text fields.
///
/// `Some` means the key was present in the request. Only non-empty values are applied:
/// `{"description": ""}` counts as a request with fields, but leaves the description as is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPatch {
    #[serde(default)]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RecordPatch {
    /// True when the request carried neither field.
    pub fn is_empty(&self) -> bool {
        self.inventory_name.is_none() && self.description.is_none()
    }

    pub fn apply(&self, record: &mut InventoryRecord) {
        if let Some(name) = non_empty(self.inventory_name.as_deref()) {
            record.inventory_name = name.to_string();
        }
        if let Some(description) = non_empty(self.description.as_deref()) {
            record.description = description.to_string();
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

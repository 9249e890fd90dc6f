//! The Inventory Service.
//!
//! Owns the record store and the photo store and is the only way handlers touch either.
//! Mutations take the store's write guard and keep it across the matching file write or
//! delete, so a record and its photo file always change together. Reads share the read guard.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::inventory::record::{
    non_empty, InventoryRecord, RecordLookup, RecordPatch, RecordSummary, DEFAULT_DESCRIPTION,
};
use crate::domain::inventory::search::SearchCriteria;
use crate::domain::inventory::store::RecordStore;
use crate::storage::photos::{PhotoContent, PhotoStore, UploadedFile};
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct InventoryService {
    records: RwLock<RecordStore>,
    photos: PhotoStore,
}

impl InventoryService {
    /// Creates a service with an empty store on top of the given photo store.
    pub fn new(photos: PhotoStore) -> Self {
        Self {
            records: RwLock::new(RecordStore::new()),
            photos,
        }
    }

    pub fn photos(&self) -> &PhotoStore {
        &self.photos
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Registers a new item.
    ///
    /// A missing name rejects the request and discards the upload that came with it. If the
    /// upload cannot be bound, the new record is dropped again (its id stays consumed).
    pub async fn create(
        &self,
        inventory_name: Option<String>,
        description: Option<String>,
        upload: Option<UploadedFile>,
    ) -> InventoryResult<InventoryRecord> {
        let Some(name) = non_empty(inventory_name.as_deref()).map(str::to_string) else {
            if let Some(upload) = upload {
                self.photos.discard(&upload.stored_name).await;
            }
            return Err(InventoryError::validation("inventory_name is required"));
        };
        let description = non_empty(description.as_deref())
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string();

        let upload_meta = upload.as_ref().map(|u| (u.original_name.clone(), u.size));

        let mut records = self.records.write().await;
        let record = records.insert(name, description);
        let id = record.id;

        if let Some(upload) = upload {
            let stored_name = upload.stored_name.clone();
            if let Err(e) = self.photos.attach(record, upload).await {
                warn!(id, error = %e, "inventory: photo attach failed, rolling back");
                let _ = records.remove(id);
                self.photos.discard(&stored_name).await;
                return Err(e);
            }
        }

        let record = records.get(id)?.clone();
        info!(
            id,
            name = %record.inventory_name,
            photo = record.photo.is_some(),
            original_name = upload_meta.as_ref().and_then(|(n, _)| n.as_deref()),
            size = upload_meta.as_ref().map(|(_, s)| *s),
            "inventory: registered"
        );
        Ok(record)
    }

    pub async fn list(&self) -> Vec<RecordSummary> {
        self.records.read().await.list()
    }

    pub async fn get(&self, id: u64) -> InventoryResult<InventoryRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn update(&self, id: u64, patch: RecordPatch) -> InventoryResult<InventoryRecord> {
        let mut records = self.records.write().await;
        let record = records.update(id, &patch)?.clone();
        info!(id, "inventory: updated");
        Ok(record)
    }

    /// Replaces the item's photo. The upload is discarded when the item does not exist.
    pub async fn replace_photo(
        &self,
        id: u64,
        upload: Option<UploadedFile>,
    ) -> InventoryResult<InventoryRecord> {
        let mut records = self.records.write().await;
        let record = match records.get_mut(id) {
            Ok(r) => r,
            Err(e) => {
                if let Some(upload) = upload {
                    self.photos.discard(&upload.stored_name).await;
                }
                return Err(e);
            }
        };
        self.photos.replace(record, upload).await?;
        info!(id, "inventory: photo replaced");
        Ok(record.clone())
    }

    /// Deletes the item and, if it had one, its photo file.
    pub async fn delete(&self, id: u64) -> InventoryResult<InventoryRecord> {
        let mut records = self.records.write().await;
        let removed = records.remove(id)?;
        if let Some(photo) = &removed.photo {
            self.photos.discard(&photo.filename).await;
        }
        info!(id, "inventory: deleted");
        Ok(removed)
    }

    pub async fn photo(&self, id: u64) -> InventoryResult<PhotoContent> {
        let records = self.records.read().await;
        let record = records.get(id)?;
        self.photos.load(record).await
    }

    pub async fn search(&self, criteria: SearchCriteria) -> InventoryResult<Vec<RecordSummary>> {
        let query = criteria.into_query()?;
        Ok(self.records.read().await.search(&query))
    }

    /// Looks an item up by a raw (unparsed) id.
    ///
    /// Only text that is not an integer at all is rejected. Integers no record can carry
    /// (negative, or beyond `u64`) are reported as not found.
    pub async fn find_by_id(&self, raw_id: &str, include_photo: bool) -> InventoryResult<RecordLookup> {
        let trimmed = raw_id.trim();
        let digits = trimmed.strip_prefix(&['+', '-'][..]).unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InventoryError::validation(format!("Invalid id '{}'", raw_id)));
        }
        let Ok(id) = trimmed.parse::<u64>() else {
            return Err(InventoryError::not_found(format!(
                "Inventory item with id {} not found",
                trimmed
            )));
        };
        let records = self.records.read().await;
        Ok(records.get(id)?.lookup(include_photo))
    }
}

//! Criteria search over inventory records.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::inventory::record::{non_empty, InventoryRecord};
use serde::Deserialize;

/// Search terms as sent by clients. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_name: Option<String>,
}

/// Lowercased, non-empty terms ready for matching.
#[derive(Debug)]
pub struct SearchQuery {
    name: Option<String>,
    description: Option<String>,
    photo_name: Option<String>,
}

impl SearchCriteria {
    pub fn into_query(self) -> InventoryResult<SearchQuery> {
        let lower = |v: &Option<String>| non_empty(v.as_deref()).map(str::to_lowercase);
        let query = SearchQuery {
            name: lower(&self.inventory_name),
            description: lower(&self.description),
            photo_name: lower(&self.photo_name),
        };
        if query.name.is_none() && query.description.is_none() && query.photo_name.is_none() {
            return Err(InventoryError::validation(
                "At least one search criterion (inventory_name, description, photo_name) is required",
            ));
        }
        Ok(query)
    }
}

impl SearchQuery {
    /// A record matches when any supplied term is a case-insensitive substring of its field.
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| {
            needle
                .as_deref()
                .map_or(false, |n| haystack.to_lowercase().contains(n))
        };
        contains(&record.inventory_name, &self.name)
            || contains(&record.description, &self.description)
            || record
                .photo_filename()
                .map_or(false, |f| contains(f, &self.photo_name))
    }
}

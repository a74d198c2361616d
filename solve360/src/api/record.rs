//! The in-memory Solve360 record entity

use std::collections::HashMap;

use crate::api::mapping::FieldMapping;
use crate::api::transcode;

/// A link from one record to another, addressed by the target's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedItem {
    pub id: String,
}

impl RelatedItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// An addressable CRM record: identity, scalar attributes, a human-labelled
/// field map and related-item collections.
///
/// `id == None` means the record has not been persisted yet; the first
/// successful save assigns the service identifier.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub id: Option<String>,
    pub typeid: Option<String>,
    pub name: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub viewed: Option<String>,
    pub ownership: Option<String>,
    pub flagged: Option<bool>,
    /// Custom data keyed by human field label.
    pub fields: HashMap<String, String>,
    /// Links already confirmed by the service.
    pub related_items: Vec<RelatedItem>,
    /// Links queued for creation on the next save. Disjoint from
    /// `related_items` until that save succeeds.
    pub related_items_to_add: Vec<RelatedItem>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an unsaved record from a human-labelled field map.
    pub fn with_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    /// Whether this record has not yet been persisted to the service.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Queue a related item for creation on the next save. No validation
    /// that the item is not already linked.
    pub fn add_related_item(&mut self, item: RelatedItem) {
        self.related_items_to_add.push(item);
    }

    /// This record's fields keyed by API identifier, in mapping order.
    pub fn map_human_fields(&self, mapping: &FieldMapping) -> Vec<(String, String)> {
        transcode::human_to_api(mapping, &self.fields)
    }
}

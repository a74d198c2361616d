//! Field mapping tables for Solve360 record types
//!
//! Solve360 addresses custom fields by opaque identifiers (`custom12345`);
//! application code works with human labels ("Description"). A
//! [`FieldMapping`] is the ordered, bidirectional association between the
//! two, declared once per record type and read-only afterwards.

use crate::api::pluralization::resource_name;

/// Ordered bidirectional association between human field labels and API
/// field identifiers, unique on the API identifier.
///
/// Registration order is preserved and determines the field order of
/// serialized request bodies.
#[derive(Debug, Clone, Default)]
pub struct FieldMapping {
    pairs: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one `(human label, api identifier)` pair.
    ///
    /// If the identifier is already registered the new pair replaces the
    /// old one in place (last write wins, position retained). Duplicate
    /// human labels are not rejected; on the human-to-api direction the
    /// later registration wins by iteration order.
    pub fn register(&mut self, human: impl Into<String>, api: impl Into<String>) {
        let human = human.into();
        let api = api.into();
        match self.pairs.iter_mut().find(|(_, a)| *a == api) {
            Some(pair) => pair.0 = human,
            None => self.pairs.push((human, api)),
        }
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, human: impl Into<String>, api: impl Into<String>) -> Self {
        self.register(human, api);
        self
    }

    /// API identifier registered for a human label.
    pub fn api_for(&self, human: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(h, _)| h == human)
            .map(|(_, a)| a.as_str())
    }

    /// Human label registered for an API identifier.
    pub fn human_for(&self, api: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(_, a)| a == api)
            .map(|(h, _)| h.as_str())
    }

    /// Pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(h, a)| (h.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A record type definition: type name plus its field mapping table.
///
/// Built once at configuration time and shared by `Arc`; the mapping is not
/// mutable afterwards, so transcoding calls may read it concurrently.
#[derive(Debug, Clone)]
pub struct RecordType {
    name: String,
    mapping: FieldMapping,
}

impl RecordType {
    pub fn new(name: impl Into<String>, mapping: FieldMapping) -> Self {
        Self {
            name: name.into(),
            mapping,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    /// URL path segment for this type: name lower-cased and pluralized
    /// (`Contact` -> `contacts`, `Company` -> `companies`).
    pub fn resource(&self) -> String {
        resource_name(&self.name)
    }
}

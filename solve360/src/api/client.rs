//! Record lifecycle controller
//!
//! One [`RecordClient`] per record type drives create, update, find and
//! search against the service, combining the transcoder with the injected
//! [`Transport`] and shared [`Config`].

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::api::mapping::RecordType;
use crate::api::record::Record;
use crate::api::transcode;
use crate::api::transport::{ApiRequest, Method, Transport};
use crate::config::Config;
use crate::error::Error;

/// Identifier argument to [`RecordClient::find`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindKey {
    /// Every record of the type (the collection endpoint).
    All,
    /// One record by service identifier.
    Id(String),
}

/// Result of a [`RecordClient::find`] dispatch.
#[derive(Debug)]
pub enum FindResult {
    One(Record),
    Many(Vec<Record>),
}

/// Lifecycle controller for one record type.
///
/// Synchronous in effect: every operation issues at most one request and
/// completes or fails before returning. The controller holds no per-call
/// state; concurrent use is safe as long as each [`Record`] has a single
/// writer.
#[derive(Clone)]
pub struct RecordClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
    record_type: Arc<RecordType>,
}

impl RecordClient {
    pub fn new(
        config: Arc<Config>,
        transport: Arc<dyn Transport>,
        record_type: Arc<RecordType>,
    ) -> Self {
        Self {
            config,
            transport,
            record_type,
        }
    }

    pub fn record_type(&self) -> &RecordType {
        &self.record_type
    }

    /// Persist a record's state to the service.
    ///
    /// A record without an id is created (`POST /{resource}`) and assigned
    /// the identifier the service returns; a persisted record is updated
    /// (`PUT /{resource}/{id}`). Blank ownership defaults from the
    /// configuration before the request is built.
    ///
    /// On success queued related items are drained into `related_items`
    /// (the queue is cleared, so a later save does not resubmit them) and
    /// the raw response is returned. A response carrying a non-empty error
    /// map fails with [`Error::SaveFailure`]; the record keeps its prior
    /// state apart from the ownership default.
    pub async fn save(&self, record: &mut Record) -> Result<Value, Error> {
        if record.ownership.as_deref().is_none_or(str::is_empty) {
            record.ownership = Some(self.config.default_ownership.clone());
        }
        let ownership = record.ownership.clone().unwrap_or_default();

        let body = transcode::request_body(
            self.record_type.mapping(),
            &record.fields,
            &record.related_items_to_add,
            &ownership,
        );

        let resource = self.record_type.resource();
        let request = match &record.id {
            None => ApiRequest::new(Method::Post, format!("/{resource}")),
            Some(id) => ApiRequest::new(Method::Put, format!("/{resource}/{id}")),
        }
        .with_body(body);

        debug!("saving {} record (new: {})", self.record_type.name(), record.is_new());
        let response = self.transport.execute(request).await?;

        if let Some(errors) = response["response"].get("errors") {
            if !errors.is_null() && errors.as_object().is_none_or(|map| !map.is_empty()) {
                return Err(Error::SaveFailure {
                    message: error_messages(errors),
                });
            }
        }

        if record.is_new() {
            let id = response["response"]["item"]
                .get("id")
                .and_then(transcode::scalar_string)
                .ok_or_else(|| {
                    Error::MalformedResponse("create response has no item id".into())
                })?;
            record.id = Some(id);
        }

        // pending links are confirmed by this save; the queue is drained so
        // a later save cannot resubmit them
        let queued = std::mem::take(&mut record.related_items_to_add);
        record.related_items.extend(queued);

        Ok(response)
    }

    /// Create a record from a human-labelled field map and persist it.
    pub async fn create<I, K, V>(&self, fields: I) -> Result<Record, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Record::with_fields(fields);
        self.save(&mut record).await?;
        Ok(record)
    }

    /// Dispatch to [`find_one`](Self::find_one) or
    /// [`find_all`](Self::find_all) based on the key.
    pub async fn find(
        &self,
        key: FindKey,
        query: Vec<(String, String)>,
    ) -> Result<FindResult, Error> {
        match key {
            FindKey::All => self.find_all(query).await.map(FindResult::Many),
            FindKey::Id(id) => self.find_one(&id, query).await.map(FindResult::One),
        }
    }

    /// Read a single record by identifier.
    pub async fn find_one(
        &self,
        id: &str,
        query: Vec<(String, String)>,
    ) -> Result<Record, Error> {
        let resource = self.record_type.resource();
        debug!("reading {} {id}", self.record_type.name());
        let response = self
            .transport
            .execute(ApiRequest::new(Method::Get, format!("/{resource}/{id}")).with_query(query))
            .await?;
        transcode::record_from_singular(&self.record_type, &response)
    }

    /// Read the collection endpoint, in response order.
    pub async fn find_all(&self, query: Vec<(String, String)>) -> Result<Vec<Record>, Error> {
        let resource = self.record_type.resource();
        debug!("listing {}", resource);
        let response = self
            .transport
            .execute(
                ApiRequest::new(Method::Get, format!("/{resource}/"))
                    .with_body(transcode::FIND_ALL_BODY)
                    .with_query(query),
            )
            .await?;
        transcode::records_from_collection(&self.record_type, &response)
    }

    /// [`find_all`](Self::find_all) constrained by the service's filter
    /// mode/value pair. A thin convenience, not a query language.
    pub async fn search(
        &self,
        filter_field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Vec<Record>, Error> {
        self.find_all(vec![
            ("filtermode".to_string(), filter_field.into()),
            ("filtervalue".to_string(), value.into()),
        ])
        .await
    }
}

/// Join a response error map into one `"field: message"` line per error,
/// in response order. List-valued messages join with ", ".
fn error_messages(errors: &Value) -> String {
    match errors.as_object() {
        Some(map) => map
            .iter()
            .map(|(field, message)| format!("{field}: {}", message_text(message)))
            .collect::<Vec<_>>()
            .join("\n"),
        None => message_text(errors),
    }
}

fn message_text(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(message_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

//! Record transcoding between human fields and the Solve360 wire format
//!
//! Pure translation functions: human-labelled field maps to API-identifier
//! maps and back, XML request-body serialization, and reconstruction of
//! [`Record`] values from singular and collection JSON responses.
//!
//! The service wraps every leaf field value in a content envelope
//! (`{"__content__": value, ...metadata}`); only the content value is
//! extracted here.

use std::collections::HashMap;

use quick_xml::escape::escape;
use serde_json::Value;

use crate::api::mapping::{FieldMapping, RecordType};
use crate::api::record::{Record, RelatedItem};
use crate::error::Error;

/// Fixed request body for collection reads.
pub const FIND_ALL_BODY: &str = "<request><layout>1</layout></request>";

/// Translate a human-labelled field map to `(api identifier, value)` pairs
/// in mapping registration order.
///
/// A pair is emitted only when the human field is present and non-blank;
/// blank fields are omitted, never sent as empty tags. Input labels without
/// a registered mapping are dropped.
pub fn human_to_api(mapping: &FieldMapping, fields: &HashMap<String, String>) -> Vec<(String, String)> {
    mapping
        .iter()
        .filter_map(|(human, api)| {
            fields
                .get(human)
                .filter(|value| !value.is_empty())
                .map(|value| (api.to_string(), value.clone()))
        })
        .collect()
}

/// Translate a wire-form field object back to a human-labelled map.
///
/// For each registered pair the wire object must hold the identifier with a
/// present, non-blank content envelope; everything else is omitted.
pub fn api_to_human(mapping: &FieldMapping, wire: &Value) -> HashMap<String, String> {
    mapping
        .iter()
        .filter_map(|(human, api)| {
            let content = wire.get(api).and_then(envelope_content)?;
            Some((human.to_string(), content))
        })
        .collect()
}

/// Serialize a record's state to the service's XML request body.
///
/// One element per mapped non-blank field (tag = api identifier, text =
/// escaped value) in mapping registration order, a `relateditems` block for
/// any queued links, and the ownership element. All scalar values are
/// XML-escaped exactly once.
pub fn request_body(
    mapping: &FieldMapping,
    fields: &HashMap<String, String>,
    related_to_add: &[RelatedItem],
    ownership: &str,
) -> String {
    let mut xml = String::from("<request>");

    for (api, value) in human_to_api(mapping, fields) {
        xml.push_str(&format!("<{api}>{}</{api}>", escape(value.as_str())));
    }

    if !related_to_add.is_empty() {
        xml.push_str("<relateditems>");
        for item in related_to_add {
            xml.push_str(&format!(
                "<add><relatedto><id>{}</id></relatedto></add>",
                escape(item.id.as_str())
            ));
        }
        xml.push_str("</relateditems>");
    }

    xml.push_str(&format!("<ownership>{}</ownership>", escape(ownership)));
    xml.push_str("</request>");
    xml
}

/// Rebuild a [`Record`] from a singular API response.
///
/// Requires `response.response.item` to be an object; scalar attributes are
/// read directly off the item, the nested `fields` block maps through
/// [`api_to_human`] (absent block = empty field map), and a present
/// `relateditems.relatedto` populates `related_items`, normalizing a single
/// object into a one-element vec.
pub fn record_from_singular(record_type: &RecordType, response: &Value) -> Result<Record, Error> {
    let envelope = &response["response"];
    let item = envelope
        .get("item")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MalformedResponse("singular response has no item object".into()))?;

    let mut record = Record {
        id: item.get("id").and_then(scalar_string),
        typeid: item.get("typeid").and_then(scalar_string),
        name: item.get("name").and_then(scalar_string),
        created: item.get("created").and_then(scalar_string),
        updated: item.get("updated").and_then(scalar_string),
        viewed: item.get("viewed").and_then(scalar_string),
        ownership: item.get("ownership").and_then(scalar_string),
        flagged: item.get("flagged").and_then(scalar_flag),
        ..Record::default()
    };

    if let Some(fields) = item.get("fields") {
        record.fields = api_to_human(record_type.mapping(), fields);
    }

    if let Some(related) = envelope.get("relateditems").and_then(|r| r.get("relatedto")) {
        record.related_items = match related {
            Value::Array(items) => items.iter().filter_map(related_item_from).collect(),
            single => related_item_from(single).into_iter().collect(),
        };
    }

    Ok(record)
}

/// Rebuild records from a collection API response.
///
/// Requires `response.response` to be an object; members are visited in
/// response order and kept iff [`looks_like_record`] holds. Non-record
/// members (e.g. the `count` scalar) are skipped without a placeholder.
pub fn records_from_collection(
    record_type: &RecordType,
    response: &Value,
) -> Result<Vec<Record>, Error> {
    let envelope = response
        .get("response")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MalformedResponse("collection response has no response object".into()))?;

    Ok(envelope
        .values()
        .filter(|item| looks_like_record(item))
        .map(|item| Record {
            id: item.get("id").and_then(scalar_string),
            fields: api_to_human(record_type.mapping(), item),
            ..Record::default()
        })
        .collect())
}

/// Whether a collection member carries record wire shape: an object with a
/// non-empty `id`.
fn looks_like_record(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("id"))
        .and_then(scalar_string)
        .is_some()
}

/// Extract the content value from a field envelope, normalized to its
/// string form. Absent, null or empty content yields `None`.
fn envelope_content(value: &Value) -> Option<String> {
    value.get("__content__").and_then(scalar_string)
}

/// Normalize a scalar wire value (string, number or bool) to a non-empty
/// string. Objects fall back to their content envelope.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(_) => envelope_content(value),
        _ => None,
    }
}

/// Interpret the service's boolean-like `flagged` marker.
fn scalar_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_i64() != Some(0)),
        Value::String(s) => match s.as_str() {
            "0" | "" | "false" => Some(false),
            _ => Some(true),
        },
        _ => None,
    }
}

fn related_item_from(value: &Value) -> Option<RelatedItem> {
    value.get("id").and_then(scalar_string).map(RelatedItem::new)
}

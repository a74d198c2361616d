//! Record lifecycle integration tests against a scripted transport double.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use solve360::{
    ApiRequest, Config, Error, FieldMapping, FindKey, FindResult, Method, Record, RecordClient,
    RecordType, RelatedItem, Transport,
};

/// Replays canned responses in order and records every request it sees.
struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, Error>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    fn new(responses: Vec<Result<Value, Error>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, Error> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("transport double ran out of scripted responses")
    }
}

fn contacts_client(transport: Arc<MockTransport>) -> RecordClient {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = Arc::new(Config::new(
        "https://secure.solve360.com",
        "user@example.com",
        "api-token",
        "99999",
    ));
    let record_type = Arc::new(RecordType::new(
        "Contact",
        FieldMapping::new()
            .with("First Name", "firstname")
            .with("Last Name", "lastname"),
    ));
    RecordClient::new(config, transport, record_type)
}

fn created_response(id: u64) -> Result<Value, Error> {
    Ok(json!({"response": {"item": {"id": id}}}))
}

#[tokio::test]
async fn create_posts_to_collection_and_assigns_id() {
    let transport = MockTransport::new(vec![created_response(12345)]);
    let client = contacts_client(Arc::clone(&transport));

    let record = client.create([("First Name", "Steve")]).await.unwrap();

    assert!(!record.is_new());
    assert_eq!(record.id.as_deref(), Some("12345"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "/contacts");
    let body = requests[0].body.as_deref().unwrap();
    assert!(body.contains("<firstname>Steve</firstname>"));
    assert!(body.contains("<ownership>99999</ownership>"));
}

#[tokio::test]
async fn save_on_persisted_record_puts_to_resource() {
    let transport = MockTransport::new(vec![Ok(json!({"response": {"status": "success"}}))]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::with_fields([("Last Name", "Smith")]);
    record.id = Some("12345".into());
    client.save(&mut record).await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].path, "/contacts/12345");
    // id assigned once, on first save only
    assert_eq!(record.id.as_deref(), Some("12345"));
}

#[tokio::test]
async fn save_defaults_blank_ownership_from_config() {
    let transport = MockTransport::new(vec![created_response(1)]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::new();
    client.save(&mut record).await.unwrap();

    assert_eq!(record.ownership.as_deref(), Some("99999"));
}

#[tokio::test]
async fn save_keeps_explicit_ownership() {
    let transport = MockTransport::new(vec![created_response(1)]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::new();
    record.ownership = Some("42".into());
    client.save(&mut record).await.unwrap();

    assert_eq!(record.ownership.as_deref(), Some("42"));
    assert!(
        transport.requests()[0]
            .body
            .as_deref()
            .unwrap()
            .contains("<ownership>42</ownership>")
    );
}

#[tokio::test]
async fn save_failure_joins_field_errors_in_response_order() {
    let transport = MockTransport::new(vec![Ok(json!({
        "response": {"errors": {"name": "required", "email": "invalid"}},
    }))]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::with_fields([("First Name", "Steve")]);
    record.add_related_item(RelatedItem::new("7"));
    let err = client.save(&mut record).await.unwrap_err();

    match err {
        Error::SaveFailure { message } => {
            assert_eq!(message, "name: required\nemail: invalid");
        }
        other => panic!("expected SaveFailure, got {other:?}"),
    }

    // failed save leaves the record untouched apart from the ownership default
    assert!(record.is_new());
    assert!(record.related_items.is_empty());
    assert_eq!(record.related_items_to_add, vec![RelatedItem::new("7")]);
}

#[tokio::test]
async fn pending_links_migrate_once_on_success() {
    let transport = MockTransport::new(vec![created_response(1), Ok(json!({"response": {}}))]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::new();
    record.add_related_item(RelatedItem::new("111"));
    record.add_related_item(RelatedItem::new("222"));
    client.save(&mut record).await.unwrap();

    assert_eq!(
        record.related_items,
        vec![RelatedItem::new("111"), RelatedItem::new("222")]
    );
    assert!(record.related_items_to_add.is_empty());

    // a second save must not resubmit the already-confirmed links
    client.save(&mut record).await.unwrap();
    let second_body = transport.requests()[1].body.clone().unwrap();
    assert!(!second_body.contains("<relateditems>"));
    assert_eq!(record.related_items.len(), 2);
}

#[tokio::test]
async fn save_queues_related_items_in_request_body() {
    let transport = MockTransport::new(vec![created_response(1)]);
    let client = contacts_client(Arc::clone(&transport));

    let mut record = Record::new();
    record.add_related_item(RelatedItem::new("111"));
    client.save(&mut record).await.unwrap();

    let body = transport.requests()[0].body.clone().unwrap();
    assert!(body.contains("<relateditems><add><relatedto><id>111</id></relatedto></add></relateditems>"));
}

#[tokio::test]
async fn create_response_without_item_id_is_malformed() {
    let transport = MockTransport::new(vec![Ok(json!({"response": {"status": "success"}}))]);
    let client = contacts_client(transport);

    let mut record = Record::new();
    let err = client.save(&mut record).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)));
    assert!(record.is_new());
}

#[tokio::test]
async fn transport_failures_pass_through_save_unwrapped() {
    let transport = MockTransport::new(vec![Err(Error::Config("connection refused".into()))]);
    let client = contacts_client(transport);

    let mut record = Record::new();
    let err = client.save(&mut record).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn find_one_deserializes_singular_response() {
    let transport = MockTransport::new(vec![Ok(json!({
        "response": {
            "item": {
                "id": 12345,
                "name": "Steve Smith",
                "fields": {"firstname": {"__content__": "Steve"}},
            },
            "relateditems": {"relatedto": {"id": 99}},
        },
    }))]);
    let client = contacts_client(Arc::clone(&transport));

    let record = client.find_one("12345", Vec::new()).await.unwrap();

    assert_eq!(record.id.as_deref(), Some("12345"));
    assert_eq!(record.name.as_deref(), Some("Steve Smith"));
    assert_eq!(record.fields.get("First Name").map(String::as_str), Some("Steve"));
    assert_eq!(record.related_items, vec![RelatedItem::new("99")]);

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, "/contacts/12345");
}

#[tokio::test]
async fn find_all_sends_layout_body_and_skips_non_records() {
    let transport = MockTransport::new(vec![Ok(json!({
        "response": {
            "12345": {"id": 12345, "firstname": {"__content__": "Steve"}},
            "count": 3,
            "12346": {"id": 12346, "firstname": {"__content__": "Jane"}},
        },
    }))]);
    let client = contacts_client(Arc::clone(&transport));

    let records = client.find_all(Vec::new()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some("12345"));
    assert_eq!(records[1].id.as_deref(), Some("12346"));

    let requests = transport.requests();
    assert_eq!(requests[0].path, "/contacts/");
    assert_eq!(
        requests[0].body.as_deref(),
        Some("<request><layout>1</layout></request>")
    );
}

#[tokio::test]
async fn search_constrains_by_filter_mode_and_value() {
    let transport = MockTransport::new(vec![Ok(json!({"response": {}}))]);
    let client = contacts_client(Arc::clone(&transport));

    let records = client.search("byname", "Steve").await.unwrap();
    assert!(records.is_empty());

    let requests = transport.requests();
    assert_eq!(
        requests[0].query,
        vec![
            ("filtermode".to_string(), "byname".to_string()),
            ("filtervalue".to_string(), "Steve".to_string()),
        ]
    );
}

#[tokio::test]
async fn find_dispatches_on_key() {
    let transport = MockTransport::new(vec![
        Ok(json!({"response": {}})),
        Ok(json!({"response": {"item": {"id": 1}}})),
    ]);
    let client = contacts_client(Arc::clone(&transport));

    match client.find(FindKey::All, Vec::new()).await.unwrap() {
        FindResult::Many(records) => assert!(records.is_empty()),
        FindResult::One(_) => panic!("expected collection result"),
    }

    match client.find(FindKey::Id("1".into()), Vec::new()).await.unwrap() {
        FindResult::One(record) => assert_eq!(record.id.as_deref(), Some("1")),
        FindResult::Many(_) => panic!("expected singular result"),
    }
}

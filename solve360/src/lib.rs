//! Client library for the Solve360 CRM API
//!
//! Solve360 exposes every record (contact, company, project blog, ...) behind
//! opaque wire-level field identifiers such as `custom12345`. This crate keeps
//! application code working in a human field vocabulary and handles the
//! translation at the API boundary: a per-record-type [`FieldMapping`] drives
//! the bidirectional label/identifier conversion, requests are serialized to
//! the service's XML body format, and JSON responses are rebuilt into typed
//! [`Record`] values.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use solve360::{Config, FieldMapping, HttpTransport, Record, RecordClient, RecordType};
//!
//! # async fn run() -> Result<(), solve360::Error> {
//! let config = Arc::new(Config::new(
//!     "https://secure.solve360.com",
//!     "user@example.com",
//!     "api-token",
//!     "12345",
//! ));
//!
//! let contacts = RecordClient::new(
//!     Arc::clone(&config),
//!     Arc::new(HttpTransport::new(&config)),
//!     Arc::new(RecordType::new(
//!         "Contact",
//!         FieldMapping::new()
//!             .with("First Name", "firstname")
//!             .with("Description", "custom12345"),
//!     )),
//! );
//!
//! let mut record = Record::with_fields([("First Name", "Steve")]);
//! contacts.save(&mut record).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;

pub use api::client::{FindKey, FindResult, RecordClient};
pub use api::mapping::{FieldMapping, RecordType};
pub use api::record::{Record, RelatedItem};
pub use api::transport::{ApiRequest, HttpTransport, Method, Transport};
pub use config::Config;
pub use error::Error;

//! Solve360 API module
//!
//! Field-mapping tables, record transcoding, the record entity and the
//! lifecycle controller that drives create/update/find/search against the
//! service, behind an injectable [`transport::Transport`] seam.

pub mod client;
pub mod mapping;
pub mod pluralization;
pub mod record;
pub mod transcode;
pub mod transport;

pub use client::{FindKey, FindResult, RecordClient};
pub use mapping::{FieldMapping, RecordType};
pub use record::{Record, RelatedItem};
pub use transport::{ApiRequest, HttpTransport, Method, Transport};

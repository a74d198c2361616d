//! Error taxonomy for Solve360 API interactions

/// Errors surfaced by record lifecycle and transcoding operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service rejected a create/update. The message is the
    /// newline-joined `"field: message"` list from the response, in
    /// response order.
    #[error("save rejected by service:\n{message}")]
    SaveFailure { message: String },

    /// The response body did not have the shape the operation requires
    /// (e.g. a singular read without a `response.item` object).
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A transport-level failure (connection, TLS, non-JSON body, ...).
    /// Never converted into `SaveFailure`; callers see it unchanged.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

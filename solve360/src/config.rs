//! Process-wide client configuration
//!
//! Holds the service URL, credentials and the default ownership value used
//! when a record is saved without one. The core never mutates a `Config`;
//! it is built once and shared by `Arc`.

use serde::Deserialize;

use crate::error::Error;

/// Connection and ownership configuration for a Solve360 account.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the service, e.g. `https://secure.solve360.com`.
    pub url: String,
    /// Account e-mail used for HTTP basic auth.
    pub username: String,
    /// API token used as the basic-auth password.
    pub token: String,
    /// Ownership applied to records saved without an explicit owner.
    pub default_ownership: String,
}

impl Config {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
        default_ownership: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            token: token.into(),
            default_ownership: default_ownership.into(),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// ```toml
    /// url = "https://secure.solve360.com"
    /// username = "user@example.com"
    /// token = "api-token"
    /// default_ownership = "12345"
    /// ```
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.as_ref().display())))?;
        toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `SOLVE360_URL`, `SOLVE360_USER`,
    /// `SOLVE360_TOKEN` and `SOLVE360_OWNERSHIP`.
    pub fn from_env() -> Result<Self, Error> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
        };
        Ok(Self {
            url: var("SOLVE360_URL")?,
            username: var("SOLVE360_USER")?,
            token: var("SOLVE360_TOKEN")?,
            default_ownership: var("SOLVE360_OWNERSHIP")?,
        })
    }
}

//! Backend connection settings.

use std::fmt;

use url::Url;

use crate::Error;

/// Environment variable holding the backend endpoint.
pub const ENDPOINT_VAR: &str = "SPICEDB_ENDPOINT";
/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "SPICEDB_API_KEY";
/// Environment variable enabling TLS.
pub const TLS_VAR: &str = "SPICEDB_TLS";
/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "localhost:8443";

/// Where the backend lives and how to authenticate to it.
///
/// Read once at startup; a [`Client`](crate::Client) built from it never
/// changes configuration afterwards.
///
/// ## Example
///
/// ```rust
/// use spicebridge::Config;
///
/// let config = Config::builder()
///     .endpoint("spicedb.internal:8443")
///     .api_key("sk_test")
///     .tls(true)
///     .build();
///
/// assert_eq!(config.base_url().unwrap().as_str(), "https://spicedb.internal:8443/");
/// ```
#[derive(Clone, bon::Builder)]
pub struct Config {
    /// Endpoint, with or without a scheme.
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,

    /// Bearer token. Absent means requests are sent unauthenticated.
    #[builder(into)]
    pub api_key: Option<String>,

    /// Use `https://` when the endpoint has no scheme.
    #[builder(default = false)]
    pub tls: bool,
}

impl Config {
    /// Loads settings from the process environment.
    ///
    /// Reads `SPICEDB_ENDPOINT` (default `localhost:8443`), `SPICEDB_API_KEY`
    /// and `SPICEDB_TLS` (`true`, `1` or `yes`, case-insensitive).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// ```rust
    /// use spicebridge::Config;
    ///
    /// let config = Config::from_lookup(|name| match name {
    ///     "SPICEDB_TLS" => Some("YES".into()),
    ///     _ => None,
    /// });
    /// assert!(config.tls);
    /// assert_eq!(config.endpoint, "localhost:8443");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let tls = non_empty(TLS_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self::builder()
            .endpoint(non_empty(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()))
            .maybe_api_key(non_empty(API_KEY_VAR))
            .tls(tls)
            .build()
    }

    /// Returns the endpoint as a URL, adding a scheme when it has none.
    ///
    /// An endpoint already carrying `://` is used verbatim; otherwise
    /// `https://` or `http://` is prefixed according to [`tls`](Self::tls).
    pub fn base_url(&self) -> Result<Url, Error> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(Error::configuration("endpoint cannot be empty"));
        }

        let url = if endpoint.contains("://") {
            Url::parse(endpoint)?
        } else {
            let scheme = if self.tls { "https" } else { "http" };
            Url::parse(&format!("{}://{}", scheme, endpoint))?
        };
        Ok(url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("tls", &self.tls)
            .finish()
    }
}

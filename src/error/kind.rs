//! Error kind enumeration for categorizing bridge errors.

/// Categorization of bridge errors.
///
/// | ErrorKind       | Raised by                    | Carries            |
/// |-----------------|------------------------------|--------------------|
/// | `Format`        | relationship notation parser | message            |
/// | `Api`           | backend non-2xx response     | status, raw body   |
/// | `Parse`         | response line decoding       | offending line     |
/// | `Validation`    | tool parameter checks        | message            |
/// | `NotFound`      | definition / resource lookup | message            |
/// | `Configuration` | endpoint or header setup     | message            |
/// | `Connection`    | HTTP client (connect)        | source             |
/// | `Timeout`       | HTTP client (timeout)        | source             |
/// | `Transport`     | HTTP client (other)          | source             |
///
/// None of these are retried by the bridge; re-invoking is the caller's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Relationship text does not follow
    /// `type:id#relation@type:id[#relation]`.
    #[error("format error")]
    Format,

    /// The backend answered with a non-success status, or reported an
    /// error inside a streamed response.
    #[error("api error")]
    Api,

    /// A line of the response body was not valid JSON.
    #[error("parse error")]
    Parse,

    /// A tool invocation omitted a required field or supplied an empty one.
    ///
    /// Detected before any network call.
    #[error("validation error")]
    Validation,

    /// A schema definition, resource URI or tool name does not exist.
    #[error("not found")]
    NotFound,

    /// Invalid endpoint URL, API key header value or similar setup problem.
    #[error("configuration error")]
    Configuration,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// The underlying HTTP client timed out.
    #[error("timeout")]
    Timeout,

    /// Any other HTTP client failure.
    #[error("transport error")]
    Transport,
}

impl ErrorKind {
    /// Returns `true` if the error was detected before reaching the backend.
    ///
    /// ```rust
    /// use spicebridge::ErrorKind;
    ///
    /// assert!(ErrorKind::Validation.is_local());
    /// assert!(!ErrorKind::Api.is_local());
    /// ```
    #[inline]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ErrorKind::Format
                | ErrorKind::Validation
                | ErrorKind::NotFound
                | ErrorKind::Configuration
        )
    }

    /// Returns `true` if the error came out of the HTTP client itself.
    #[inline]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ErrorKind::Connection | ErrorKind::Timeout | ErrorKind::Transport
        )
    }
}

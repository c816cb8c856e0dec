//! Main error type for the bridge.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for bridge operations.
///
/// ## Error Anatomy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, Api errors)
/// ├── body: Option<String>     (raw response body, Api errors)
/// ├── line: Option<String>     (offending response line, Parse errors)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use spicebridge::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> String {
///     match err.kind() {
///         ErrorKind::Api => format!(
///             "backend said {}: {}",
///             err.status().unwrap_or_default(),
///             err.body().unwrap_or_default()
///         ),
///         ErrorKind::Parse => format!("bad line: {}", err.line().unwrap_or_default()),
///         _ => err.to_string(),
///     }
/// }
///
/// assert!(describe(&Error::api(503, "overloaded")).contains("503"));
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    body: Option<String>,
    line: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use spicebridge::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Validation, "resourceType is required");
    /// assert_eq!(err.kind(), ErrorKind::Validation);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            line: None,
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status of an `Api` error.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the raw response body of an `Api` error.
    #[inline]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the response line that failed to parse.
    #[inline]
    pub fn line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors, one per kind

    /// Creates a relationship-notation format error.
    pub fn format(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    /// Creates an API error from a non-success status and the full response body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.is_empty() {
            format!("backend returned HTTP {}", status)
        } else {
            format!("backend returned HTTP {}: {}", status, body)
        };
        Self {
            status: Some(status),
            body: Some(body),
            ..Self::new(ErrorKind::Api, message)
        }
    }

    /// Creates a parse error for a response line that is not valid JSON.
    pub fn parse(line: impl Into<String>, source: serde_json::Error) -> Self {
        let line = line.into();
        Self {
            message: format!("invalid JSON in response line {:?}: {}", line, source).into(),
            line: Some(line),
            ..Self::new(ErrorKind::Parse, "")
        }
        .with_source(source)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Creates a validation error for a missing or empty required field.
    pub fn missing_field(field: &str) -> Self {
        Self::validation(format!("missing required field: {}", field))
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::Parse, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::timeout(format!("request timed out: {}", err)).with_source(err)
        } else if err.is_connect() {
            Error::connection(format!("connection failed: {}", err)).with_source(err)
        } else {
            Error::transport(format!("HTTP error: {}", err)).with_source(err)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Validation, "test message");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("test message"));
        assert!(err.status().is_none());
        assert!(err.body().is_none());
        assert!(err.line().is_none());
    }

    #[test]
    fn test_api_error_keeps_status_and_body() {
        let err = Error::api(403, "{\"code\":7,\"message\":\"denied\"}");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.body(), Some("{\"code\":7,\"message\":\"denied\"}"));
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_api_error_empty_body() {
        let err = Error::api(502, "");
        assert_eq!(err.message(), "backend returned HTTP 502");
        assert_eq!(err.body(), Some(""));
    }

    #[test]
    fn test_parse_error_keeps_line() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::parse("{oops", source);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.line(), Some("{oops"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("{oops"));
    }

    #[test]
    fn test_missing_field() {
        let err = Error::missing_field("resourceType");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "missing required field: resourceType");
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Error::format("test").kind(), ErrorKind::Format);
        assert_eq!(Error::validation("test").kind(), ErrorKind::Validation);
        assert_eq!(Error::not_found("test").kind(), ErrorKind::NotFound);
        assert_eq!(Error::configuration("test").kind(), ErrorKind::Configuration);
        assert_eq!(Error::connection("test").kind(), ErrorKind::Connection);
        assert_eq!(Error::timeout("test").kind(), ErrorKind::Timeout);
        assert_eq!(Error::transport("test").kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_from_url_error() {
        let err: Error = url::Url::parse("http://[::1").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_display_format() {
        let err = Error::not_found("definition 'folder' not found in schema");
        assert_eq!(
            err.to_string(),
            "not found: definition 'folder' not found in schema"
        );
    }
}

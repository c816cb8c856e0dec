//! Client builder with typestate pattern.

use std::marker::PhantomData;
use std::sync::Arc;

use super::inner::ClientInner;
use crate::config::Config;
use crate::transport::RestTransport;
use crate::{Client, Error};

/// Marker type: endpoint not yet provided.
pub struct NoEndpoint;

/// Marker type: endpoint has been provided.
pub struct HasEndpoint;

/// Builder for creating [`Client`] instances.
///
/// Uses the typestate pattern so a client cannot be built without an
/// endpoint. The API key and TLS flag are optional.
///
/// ## Example
///
/// ```rust
/// use spicebridge::Client;
///
/// let client = Client::builder()
///     .endpoint("localhost:8443")
///     .api_key("somerandomkeyhere")
///     .build()
///     .unwrap();
///
/// assert_eq!(client.url(), Some("http://localhost:8443/"));
/// ```
pub struct ClientBuilder<EndpointState> {
    endpoint: Option<String>,
    api_key: Option<String>,
    tls: bool,
    _endpoint_state: PhantomData<EndpointState>,
}

impl ClientBuilder<NoEndpoint> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            tls: false,
            _endpoint_state: PhantomData,
        }
    }

    /// Sets the backend endpoint, with or without a scheme.
    pub fn endpoint(self, endpoint: impl Into<String>) -> ClientBuilder<HasEndpoint> {
        ClientBuilder {
            endpoint: Some(endpoint.into()),
            api_key: self.api_key,
            tls: self.tls,
            _endpoint_state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoEndpoint> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ClientBuilder<E> {
    /// Sets the bearer token sent on every call.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Uses `https://` when the endpoint carries no scheme.
    #[must_use]
    pub fn tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }
}

impl ClientBuilder<HasEndpoint> {
    /// Builds the client.
    ///
    /// Fails with [`ErrorKind::Configuration`](crate::ErrorKind::Configuration)
    /// if the endpoint is not a valid URL.
    pub fn build(self) -> Result<Client, Error> {
        let config = Config::builder()
            .maybe_endpoint(self.endpoint)
            .maybe_api_key(self.api_key)
            .tls(self.tls)
            .build();
        let transport = RestTransport::from_config(&config)?;

        Ok(Client::from_inner(ClientInner {
            url: Some(transport.base_url().to_string()),
            transport: Arc::new(transport),
        }))
    }
}

//! Client for the permissions backend.
//!
//! One [`Client`] is built per process, by the composition root, and handed
//! to every component that needs it. Cloning is cheap and every clone
//! shares the same immutable configuration and transport.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spicebridge::{Client, Config, RelationshipFilter, Consistency};
//!
//! # async fn run() -> Result<(), spicebridge::Error> {
//! let client = Client::from_config(&Config::from_env())?;
//!
//! let schema = client.read_schema().await?;
//! let filter = RelationshipFilter::build(Some("document"), None, None, None, None, None);
//! let relationships = client.read_relationships(&filter, Consistency::full()).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod inner;
mod operations;

pub use builder::{ClientBuilder, HasEndpoint, NoEndpoint};
pub use operations::paths;

use std::sync::Arc;

use crate::config::Config;
use crate::transport::{RestTransport, Transport};
use crate::Error;

/// The backend client.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Its configuration is fixed at
/// construction; there is no runtime reconfiguration, so nothing is locked.
#[derive(Clone)]
pub struct Client {
    inner: Arc<inner::ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder<NoEndpoint> {
        ClientBuilder::new()
    }

    /// Creates a REST-backed client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let transport = RestTransport::from_config(config)?;
        Ok(Self::from_inner(inner::ClientInner {
            url: Some(transport.base_url().to_string()),
            transport: Arc::new(transport),
        }))
    }

    /// Creates a client over an arbitrary transport, e.g. a
    /// [`MockTransport`](crate::MockTransport) in tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::from_inner(inner::ClientInner {
            url: None,
            transport,
        })
    }

    /// Returns the normalized base URL, if the client talks to a real endpoint.
    pub fn url(&self) -> Option<&str> {
        self.inner.url.as_deref()
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.inner.transport
    }

    pub(crate) fn from_inner(inner: inner::ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn inner(&self) -> &inner::ClientInner {
        &self.inner
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("url", &self.inner.url)
            .finish_non_exhaustive()
    }
}

//! Internal client state and the unary call path.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ErrorKind};
use crate::transport::{ApiResponse, Transport};

pub(crate) struct ClientInner {
    /// Base URL, when the transport talks to a real endpoint.
    pub url: Option<String>,

    /// Transport every call goes through.
    pub transport: Arc<dyn Transport>,
}

impl ClientInner {
    /// POSTs `body` to a unary endpoint and returns its single document.
    ///
    /// A no-content answer yields `Value::Null`.
    pub async fn unary(&self, path: &str, body: &Value) -> Result<Value, Error> {
        match self.transport.request(Method::POST, path, Some(body)).await? {
            ApiResponse::Single(value) => Ok(value),
            ApiResponse::Empty => Ok(Value::Null),
            ApiResponse::Many(values) => Err(Error::new(
                ErrorKind::Parse,
                format!(
                    "expected one JSON document from {}, got {}",
                    path,
                    values.len()
                ),
            )),
        }
    }

    /// Like [`unary`](Self::unary), decoding the document into `T`.
    pub async fn unary_as<T>(&self, path: &str, body: &Value) -> Result<T, Error>
    where
        T: DeserializeOwned + Default,
    {
        match self.unary(path, body).await? {
            Value::Null => Ok(T::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }
}

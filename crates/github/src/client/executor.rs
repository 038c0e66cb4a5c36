//! Request executor trait shared by all endpoint wrappers

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, TransportError};
use crate::params::Params;

/// Performs GET requests against the API and returns decoded JSON
///
/// Implementations own base URL resolution, credentials, status-code
/// translation and JSON decoding. Endpoint wrappers only build paths
/// and query parameters.
pub trait RequestExecutor: Send + Sync {
    /// Issue a GET for `path` (always starting with `/`) with the given query
    fn get(&self, path: &str, params: &Params) -> Result<Value>;
}

/// Decode a JSON value returned by an executor into a typed response
pub(crate) fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| {
        TransportError::Decode {
            path: path.to_string(),
            source,
        }
        .into()
    })
}

/// Parse a response body; an empty body decodes as `null`
pub(crate) fn parse_body(path: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|source| {
        TransportError::Decode {
            path: path.to_string(),
            source,
        }
        .into()
    })
}

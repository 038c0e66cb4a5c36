//! In-memory executor
//!
//! Serves canned responses keyed by path and records every request.
//! Used for testing and for exercising endpoint wrappers offline.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::RequestExecutor;
use crate::error::{Result, TransportError};
use crate::params::Params;

/// A request seen by [`RecordingExecutor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub path: String,
    pub params: Params,
}

/// Executor backed by a map of path -> response
///
/// Paths without a canned response answer with status 404.
#[derive(Default)]
pub struct RecordingExecutor {
    responses: RwLock<HashMap<String, Value>>,
    failures: RwLock<HashMap<String, u16>>,
    calls: RwLock<Vec<RecordedCall>>,
}

impl RecordingExecutor {
    /// Create an executor with no canned responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for every GET to `path`
    pub fn with_response(self, path: impl Into<String>, body: Value) -> Self {
        self.respond(path, body);
        self
    }

    /// Fail every GET to `path` with the given status
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), status);
        self
    }

    /// Set or replace the response for `path`
    pub fn respond(&self, path: impl Into<String>, body: Value) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), body);
    }

    /// All requests made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// The most recent request, if any
    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl RequestExecutor for RecordingExecutor {
    fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                path: path.to_string(),
                params: params.clone(),
            });

        let failure = self
            .failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .copied();
        let response = self
            .responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned();

        match (failure, response) {
            (None, Some(body)) => Ok(body),
            (status, _) => Err(TransportError::Status {
                status: status.unwrap_or(404),
                path: path.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serves_canned_response() {
        let executor = RecordingExecutor::new().with_response("/notifications", json!([]));

        let body = executor.get("/notifications", &Params::new()).unwrap();
        assert_eq!(body, json!([]));
        assert_eq!(executor.call_count(), 1);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let executor = RecordingExecutor::new();

        let err = executor.get("/missing", &Params::new()).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(executor.last_call().unwrap().path, "/missing");
    }

    #[test]
    fn test_failure_overrides_response() {
        let executor = RecordingExecutor::new()
            .with_response("/notifications", json!([]))
            .with_status("/notifications", 401);

        let err = executor.get("/notifications", &Params::new()).unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_records_params_in_order() {
        let executor = RecordingExecutor::new();
        let mut params = Params::new();
        params.insert("all".to_string(), "true".to_string());

        let _ = executor.get("/a", &params);
        let _ = executor.get("/b", &Params::new());

        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "/a");
        assert_eq!(calls[0].params["all"], "true");
        assert_eq!(calls[1].path, "/b");
    }
}

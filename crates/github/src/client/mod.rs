//! GitHub API client
//!
//! This module provides:
//! - The [`RequestExecutor`] trait shared by endpoint wrappers
//! - A blocking HTTP executor and an in-memory recording executor
//! - [`GithubClient`], the entry point handing out endpoint wrappers

mod executor;
mod http;
mod memory;

pub(crate) use executor::decode;
pub use executor::RequestExecutor;
pub use http::{HttpExecutor, request_url};
pub use memory::{RecordedCall, RecordingExecutor};

use std::sync::Arc;

use crate::activity::{Activity, Notifications};
use crate::config::ClientConfig;

/// Entry point for GitHub API calls
///
/// Cheap to clone; all clones share one executor.
#[derive(Clone)]
pub struct GithubClient {
    executor: Arc<dyn RequestExecutor>,
}

impl GithubClient {
    /// Create a client talking HTTP with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self::with_executor(HttpExecutor::new(config))
    }

    /// Create a client from the configuration file or environment
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self::new(ClientConfig::load()?))
    }

    /// Create a client backed by a custom executor
    pub fn with_executor(executor: impl RequestExecutor + 'static) -> Self {
        Self::from_shared(Arc::new(executor))
    }

    /// Create a client sharing an existing executor
    pub fn from_shared(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Activity API (notifications)
    pub fn activity(&self) -> Activity {
        Activity::new(Arc::clone(&self.executor))
    }

    /// Shortcut for `activity().notifications()`
    pub fn notifications(&self) -> Notifications {
        self.activity().notifications()
    }
}

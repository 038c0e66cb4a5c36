//! Activity API endpoints

mod notifications;

pub use notifications::Notifications;

use std::sync::Arc;

use crate::client::RequestExecutor;

/// Group of activity endpoints sharing one executor
#[derive(Clone)]
pub struct Activity {
    executor: Arc<dyn RequestExecutor>,
}

impl Activity {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    pub fn notifications(&self) -> Notifications {
        Notifications::new(Arc::clone(&self.executor))
    }
}

//! Notifications endpoint
//!
//! Read-only access to the user's notification threads:
//! - `GET /notifications`
//! - `GET /repos/{user}/{repo}/notifications`
//! - `GET /notifications/threads/{thread_id}`
//! - `GET /notifications/threads/{thread_id}/subscription`

use std::sync::Arc;

use crate::client::{RequestExecutor, decode};
use crate::error::{Result, ValidationError};
use crate::models::{Notification, Subscription, ThreadId};
use crate::params::{ListParams, Params, normalize_key};

/// Notifications API wrapper
#[derive(Clone)]
pub struct Notifications {
    executor: Arc<dyn RequestExecutor>,
}

impl Notifications {
    pub fn new(executor: Arc<dyn RequestExecutor>) -> Self {
        Self { executor }
    }

    /// List notifications for the current user
    ///
    /// Scoped to a single repository when both `user` and `repo` are set.
    ///
    /// # Errors
    /// `ValidationError::PartialRepoScope` if only one of `user` and `repo`
    /// is set. No request is made in that case.
    pub fn list(&self, params: &ListParams) -> Result<Vec<Notification>> {
        let path = list_path(params)?;
        log::debug!("Listing notifications from {}", path);

        let response = self.executor.get(&path, &params.to_query())?;
        decode(&path, response)
    }

    /// Alias for [`Notifications::list`]
    pub fn all(&self, params: &ListParams) -> Result<Vec<Notification>> {
        self.list(params)
    }

    /// List notifications from loose key/value options
    ///
    /// Keys are normalized and unrecognized ones are dropped before the
    /// request is built.
    pub fn list_raw<I, K, V>(&self, pairs: I) -> Result<Vec<Notification>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let params = ListParams::from_pairs(pairs)?;
        self.list(&params)
    }

    /// List notifications, passing each one to `handler` in response order
    pub fn list_with<F>(&self, params: &ListParams, mut handler: F) -> Result<()>
    where
        F: FnMut(Notification),
    {
        for notification in self.list(params)? {
            handler(notification);
        }
        Ok(())
    }

    /// View a single thread
    ///
    /// `params` keys are normalized and forwarded as the query.
    pub fn get(&self, thread_id: impl Into<ThreadId>, params: &Params) -> Result<Notification> {
        let path = thread_path(&thread_id.into())?;
        let response = self.executor.get(&path, &normalize_params(params))?;
        decode(&path, response)
    }

    /// Alias for [`Notifications::get`]
    pub fn find(&self, thread_id: impl Into<ThreadId>, params: &Params) -> Result<Notification> {
        self.get(thread_id, params)
    }

    /// View a single thread, passing it to `handler`
    ///
    /// The thread endpoint returns one object, so `handler` runs exactly once.
    pub fn get_with<F>(
        &self,
        thread_id: impl Into<ThreadId>,
        params: &Params,
        handler: F,
    ) -> Result<()>
    where
        F: FnOnce(Notification),
    {
        handler(self.get(thread_id, params)?);
        Ok(())
    }

    /// Check whether the current user is subscribed to a thread
    pub fn is_subscribed(
        &self,
        thread_id: impl Into<ThreadId>,
        params: &Params,
    ) -> Result<Subscription> {
        let path = format!("{}/subscription", thread_path(&thread_id.into())?);
        let response = self.executor.get(&path, &normalize_params(params))?;
        decode(&path, response)
    }
}

/// Canonicalize every key; on collisions the later key in order wins
fn normalize_params(params: &Params) -> Params {
    params
        .iter()
        .map(|(key, value)| (normalize_key(key), value.clone()))
        .collect()
}

fn list_path(params: &ListParams) -> Result<String> {
    let path = match params.scope()? {
        Some((user, repo)) => format!(
            "/repos/{}/{}/notifications",
            urlencoding::encode(user),
            urlencoding::encode(repo)
        ),
        None => "/notifications".to_string(),
    };
    Ok(path)
}

fn thread_path(thread_id: &ThreadId) -> Result<String> {
    if thread_id.is_blank() {
        return Err(ValidationError::MissingThreadId.into());
    }
    Ok(format!(
        "/notifications/threads/{}",
        urlencoding::encode(thread_id.as_str())
    ))
}

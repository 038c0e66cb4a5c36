//! Thread subscription response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Subscription state derived from a [`Subscription`] response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// Receiving updates for the thread
    Subscribed,
    /// Updates for the thread are muted
    Ignored,
    /// Neither flag is set
    Unknown,
}

/// Raw subscription response for a thread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub subscribed: bool,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thread_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscription {
    /// Ignored takes precedence, since an ignored thread sends no updates
    pub fn status(&self) -> SubscriptionStatus {
        if self.ignored {
            SubscriptionStatus::Ignored
        } else if self.subscribed {
            SubscriptionStatus::Subscribed
        } else {
            SubscriptionStatus::Unknown
        }
    }
}

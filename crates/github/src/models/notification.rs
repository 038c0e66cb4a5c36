//! Notification record as returned by the notifications API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ThreadId;

/// A single notification thread
///
/// Only `id` is required. The commonly used fields are typed but optional,
/// and everything else the service returns is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: ThreadId,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_read_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub subscription_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What the notification is about (issue, pull request, commit, release)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub latest_comment_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Repository the notification belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

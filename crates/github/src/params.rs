//! Request parameters for the notifications endpoints
//!
//! [`ListParams`] enumerates the options the list endpoint understands.
//! Loose key/value input goes through [`ListParams::from_pairs`], which
//! canonicalizes keys and drops anything unrecognized.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Query parameters handed to the request executor
pub type Params = BTreeMap<String, String>;

/// Options for listing notifications
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Include notifications already marked as read
    pub all: Option<bool>,
    /// Only notifications where the user is directly participating or mentioned
    pub participating: Option<bool>,
    /// Only notifications updated after this time
    pub since: Option<DateTime<Utc>>,
    /// Repository owner, used together with `repo`
    pub user: Option<String>,
    /// Repository name, used together with `user`
    pub repo: Option<String>,
}

impl ListParams {
    const ALL: &'static str = "all";
    const PARTICIPATING: &'static str = "participating";
    const SINCE: &'static str = "since";
    const USER: &'static str = "user";
    const REPO: &'static str = "repo";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = Some(all);
        self
    }

    pub fn participating(mut self, participating: bool) -> Self {
        self.participating = Some(participating);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Scope the listing to a single repository
    pub fn in_repo(self, user: impl Into<String>, repo: impl Into<String>) -> Self {
        self.user(user).repo(repo)
    }

    /// Build options from loose key/value pairs
    ///
    /// Keys are normalized with [`normalize_key`]. Unrecognized keys are
    /// dropped. A later duplicate key overrides an earlier one.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = normalize_key(key.as_ref());
            let value = value.as_ref().trim();
            match key.as_str() {
                Self::ALL => params.all = Some(parse_bool(&key, value)?),
                Self::PARTICIPATING => params.participating = Some(parse_bool(&key, value)?),
                Self::SINCE => params.since = Some(parse_timestamp(&key, value)?),
                Self::USER => params.user = Some(value.to_string()),
                Self::REPO => params.repo = Some(value.to_string()),
                other => log::trace!("Dropping unrecognized list parameter '{}'", other),
            }
        }

        Ok(params)
    }

    /// Repository scope, if any
    ///
    /// Blank values count as absent. Supplying only one of `user` and `repo`
    /// is rejected rather than silently listing every notification.
    pub fn scope(&self) -> Result<Option<(&str, &str)>, ValidationError> {
        let user = non_blank(self.user.as_deref());
        let repo = non_blank(self.repo.as_deref());

        match (user, repo) {
            (Some(user), Some(repo)) => Ok(Some((user, repo))),
            (None, None) => Ok(None),
            _ => Err(ValidationError::PartialRepoScope),
        }
    }

    /// Query string parameters; `user` and `repo` never appear here
    pub fn to_query(&self) -> Params {
        let mut query = Params::new();
        if let Some(all) = self.all {
            query.insert(Self::ALL.to_string(), all.to_string());
        }
        if let Some(participating) = self.participating {
            query.insert(Self::PARTICIPATING.to_string(), participating.to_string());
        }
        if let Some(since) = self.since {
            query.insert(Self::SINCE.to_string(), format_timestamp(&since));
        }
        query
    }
}

/// Canonicalize a parameter key: trimmed, ASCII lowercase, `-` and spaces as `_`
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Format a timestamp the way the API expects: `YYYY-MM-DDTHH:MM:SSZ`
///
/// Sub-second precision is dropped.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ValidationError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ValidationError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// RFC 3339 timestamps, or a bare `YYYY-MM-DD` date taken as midnight UTC
fn parse_timestamp(key: &str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ValidationError::InvalidTimestamp {
            key: key.to_string(),
            value: value.to_string(),
        })
}

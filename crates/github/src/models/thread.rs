//! Thread identifier for notification threads

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a notification thread
///
/// GitHub serializes thread ids as strings, but numeric ids are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawThreadId", into = "String")]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the id is empty or only whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u64> for ThreadId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<ThreadId> for String {
    fn from(id: ThreadId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThreadId {
    Text(String),
    Number(u64),
}

impl From<RawThreadId> for ThreadId {
    fn from(raw: RawThreadId) -> Self {
        match raw {
            RawThreadId::Text(s) => Self(s),
            RawThreadId::Number(n) => n.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_string_and_number() {
        let from_str: ThreadId = serde_json::from_str(r#""1234""#).unwrap();
        let from_num: ThreadId = serde_json::from_str("1234").unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_num.as_str(), "1234");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&ThreadId::from(42u64)).unwrap();
        assert_eq!(json, r#""42""#);
    }

    #[test]
    fn test_is_blank() {
        assert!(ThreadId::new("").is_blank());
        assert!(ThreadId::new("  ").is_blank());
        assert!(!ThreadId::new("7").is_blank());
    }
}

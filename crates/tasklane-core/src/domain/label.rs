use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// タスクのラベル。結果マップと context のキーを兼ねる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskLabel(String);

impl TaskLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Borrow<str> for TaskLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

//! Context - タスク間で共有される入力と途中結果
//!
//! 追加のみ（削除 API なし）。既存キーへの insert は値だけを置き換える。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::TaskError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: Map<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for initial inputs.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Value under `key`, or `TaskError::MissingKey`.
    pub fn require(&self, key: &str) -> Result<&Value, TaskError> {
        self.values.get(key).ok_or_else(|| TaskError::MissingKey {
            key: key.to_string(),
        })
    }

    pub fn require_str(&self, key: &str) -> Result<&str, TaskError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| TaskError::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            })
    }

    pub fn require_bool(&self, key: &str) -> Result<bool, TaskError> {
        self.require(key)?
            .as_bool()
            .ok_or_else(|| TaskError::TypeMismatch {
                key: key.to_string(),
                expected: "boolean",
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_replaces_value_but_keeps_key() {
        let mut ctx = Context::new().with("weather", "Sunny");
        ctx.insert("weather", "Rainy");
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.require_str("weather").unwrap(), "Rainy");
    }

    #[test]
    fn require_reports_missing_key() {
        let ctx = Context::new();
        assert_eq!(
            ctx.require("humidity").unwrap_err(),
            TaskError::MissingKey {
                key: "humidity".to_string()
            }
        );
    }

    #[test]
    fn typed_accessors_reject_wrong_types() {
        let ctx = Context::new().with("weather", 42).with("flag", "yes");
        assert_eq!(
            ctx.require_str("weather").unwrap_err(),
            TaskError::TypeMismatch {
                key: "weather".to_string(),
                expected: "string"
            }
        );
        assert!(matches!(
            ctx.require_bool("flag"),
            Err(TaskError::TypeMismatch { expected: "boolean", .. })
        ));
    }

    #[test]
    fn context_serializes_as_plain_object() {
        let ctx = Context::new().with("weather", "Cloudy").with("x", true);
        let v = serde_json::to_value(&ctx).unwrap();
        assert_eq!(v, json!({ "weather": "Cloudy", "x": true }));
    }
}

//! Outcome model: results of one run.
//!
//! - `RunResults`: label → bool（記録順も保持）
//! - `StepRecord`: 1 タスク分の実行記録
//! - `RunReport`: run 全体の記録

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::ids::RunId;
use super::label::TaskLabel;

/// Boolean outcome per task label, built incrementally by the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResults {
    values: BTreeMap<TaskLabel, bool>,
    order: Vec<TaskLabel>,
}

impl RunResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: TaskLabel, result: bool) {
        if self.values.insert(label.clone(), result).is_none() {
            self.order.push(label);
        }
    }

    pub fn get(&self, label: &str) -> Option<bool> {
        self.values.get(label).copied()
    }

    /// Labels in the order their results were first recorded.
    pub fn labels(&self) -> &[TaskLabel] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskLabel, bool)> {
        self.order
            .iter()
            .filter_map(|label| self.values.get(label).map(|r| (label, *r)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One executed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub index: usize,
    pub label: TaskLabel,
    pub result: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
    pub results: RunResults,

    /// Initial inputs plus every recorded result.
    pub context: Context,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_first_seen_order() {
        let mut results = RunResults::new();
        results.record(TaskLabel::new("b"), true);
        results.record(TaskLabel::new("a"), false);
        results.record(TaskLabel::new("b"), false);

        assert_eq!(results.len(), 2);
        assert_eq!(results.get("b"), Some(false));
        assert_eq!(
            results.labels(),
            &[TaskLabel::new("b"), TaskLabel::new("a")]
        );
        let pairs: Vec<_> = results.iter().map(|(l, r)| (l.as_str(), r)).collect();
        assert_eq!(pairs, vec![("b", false), ("a", false)]);
    }

    #[test]
    fn get_unknown_label_is_none() {
        assert_eq!(RunResults::new().get("nope"), None);
    }
}

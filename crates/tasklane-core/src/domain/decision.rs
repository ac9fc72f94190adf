//! Decision model: the final answer derived from a run's results.
//!
//! Deciders are pure functions of `RunResults`: 副作用なし、表示は呼び出し側。

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::DecisionError;
use super::outcome::RunResults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    BringUmbrella,
    NoUmbrella,

    /// Inputs were rejected before anything could be decided.
    Undecidable(String),
}

impl Decision {
    pub fn message(&self) -> &str {
        match self {
            Decision::BringUmbrella => "Yes, you should bring an umbrella.",
            Decision::NoUmbrella => "No need to bring an umbrella.",
            Decision::Undecidable(reason) => reason,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Trait for deriving a `Decision` from recorded results.
pub trait Decider: Send + Sync {
    /// Labels this decider reads. `ProcessBuilder::expect_labels` checks them
    /// at build time.
    fn required_labels(&self) -> &[&'static str];

    fn decide(&self, results: &RunResults) -> Result<Decision, DecisionError>;
}

/// Looks up `label`, or `DecisionError::MissingResult`.
pub(crate) fn lookup(results: &RunResults, label: &str) -> Result<bool, DecisionError> {
    results
        .get(label)
        .ok_or_else(|| DecisionError::MissingResult(label.to_string()))
}

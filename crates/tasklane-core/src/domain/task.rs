//! Task - ラベル付きの述語
//!
//! # 二層構造
//! - **Predicate**: `evaluate(&Context) -> Result<bool, TaskError>` だけを持つ trait
//! - **Check**: よく使う述語の tagged enum（文字列比較、フラグ参照）
//!
//! クロージャも `Predicate` として使える。

use std::fmt;

use super::context::Context;
use super::errors::TaskError;
use super::label::TaskLabel;

/// A boolean check over the shared context.
///
/// Predicates read the context and never mutate it. Recording the result is
/// the runner's job.
pub trait Predicate: Send + Sync {
    fn evaluate(&self, ctx: &Context) -> Result<bool, TaskError>;

    /// Optional human-readable line describing what is about to be checked.
    fn describe(&self, _ctx: &Context) -> Option<String> {
        None
    }
}

impl<F> Predicate for F
where
    F: Fn(&Context) -> Result<bool, TaskError> + Send + Sync,
{
    fn evaluate(&self, ctx: &Context) -> Result<bool, TaskError> {
        self(ctx)
    }
}

/// Built-in predicate kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// `ctx[key]` is a string equal to `expected`, ignoring case.
    ///
    /// `when_missing: None` makes an absent key a `TaskError::MissingKey`.
    EqualsIgnoreCase {
        key: String,
        expected: String,
        when_missing: Option<bool>,
    },

    /// `ctx[key]` is the boolean `true`, e.g. an earlier task's result.
    Flag { key: String },
}

impl Check {
    pub fn equals_ignore_case(key: impl Into<String>, expected: impl Into<String>) -> Self {
        Check::EqualsIgnoreCase {
            key: key.into(),
            expected: expected.into(),
            when_missing: None,
        }
    }

    /// Same as `equals_ignore_case`, but an absent key evaluates to `default`.
    pub fn equals_ignore_case_or(
        key: impl Into<String>,
        expected: impl Into<String>,
        default: bool,
    ) -> Self {
        Check::EqualsIgnoreCase {
            key: key.into(),
            expected: expected.into(),
            when_missing: Some(default),
        }
    }

    pub fn flag(key: impl Into<String>) -> Self {
        Check::Flag { key: key.into() }
    }
}

impl Predicate for Check {
    fn evaluate(&self, ctx: &Context) -> Result<bool, TaskError> {
        match self {
            Check::EqualsIgnoreCase {
                key,
                expected,
                when_missing,
            } => match (ctx.contains_key(key), when_missing) {
                (false, Some(default)) => Ok(*default),
                _ => {
                    let actual = ctx.require_str(key)?;
                    Ok(actual.to_lowercase() == expected.to_lowercase())
                }
            },
            Check::Flag { key } => ctx.require_bool(key),
        }
    }

    fn describe(&self, ctx: &Context) -> Option<String> {
        match self {
            Check::EqualsIgnoreCase { key, expected, .. } => {
                let actual = ctx.get(key)?.as_str()?;
                Some(format!("Checking if {key} '{actual}' is '{expected}'"))
            }
            Check::Flag { key } => Some(format!("Checking flag '{key}'")),
        }
    }
}

/// A labelled predicate. Immutable once built.
pub struct Task {
    label: TaskLabel,
    predicate: Box<dyn Predicate>,
}

impl Task {
    pub fn new(label: impl Into<TaskLabel>, predicate: impl Predicate + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn label(&self) -> &TaskLabel {
        &self.label
    }

    pub fn evaluate(&self, ctx: &Context) -> Result<bool, TaskError> {
        self.predicate.evaluate(ctx)
    }

    pub fn describe(&self, ctx: &Context) -> Option<String> {
        self.predicate.describe(ctx)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

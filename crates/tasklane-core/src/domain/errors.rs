//! Errors - エラー型

use thiserror::Error;

use super::label::TaskLabel;

/// A predicate could not produce a boolean from the context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("context key '{key}' is missing")]
    MissingKey { key: String },

    #[error("context key '{key}' is not a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
}

/// A run stopped at a failing task. Later tasks were not executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("task #{index} '{label}' failed: {source}")]
    Task {
        index: usize,
        label: TaskLabel,
        #[source]
        source: TaskError,
    },
}

/// BuildError はプロセス構築時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("task label '{0}' is already registered")]
    DuplicateLabel(TaskLabel),

    #[error("Missing task labels: {0:?}. These tasks were expected but not registered.")]
    MissingLabels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    #[error("no result recorded for task '{0}'")]
    MissingResult(String),
}

/// Input problems detected by strict validation.
///
/// Display は利用者向けの判定メッセージをそのまま返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Cannot make a decision due to invalid weather input.")]
    InvalidWeather(String),

    #[error("Cannot make a decision without humidity information.")]
    MissingHumidity,

    #[error("Cannot make a decision due to invalid humidity input.")]
    InvalidHumidity(String),
}

//! Events - run 中に発生するドメインイベント
//!
//! EventSink に順番どおり送られる。

use serde::Serialize;

use super::errors::TaskError;
use super::ids::RunId;
use super::label::TaskLabel;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    RunStarted {
        run_id: RunId,
        task_count: usize,
    },
    TaskStarted {
        run_id: RunId,
        index: usize,
        label: TaskLabel,
    },
    /// A predicate's description of what it is checking.
    Note {
        run_id: RunId,
        index: usize,
        message: String,
    },
    TaskCompleted {
        run_id: RunId,
        index: usize,
        label: TaskLabel,
        result: bool,
    },
    TaskFailed {
        run_id: RunId,
        index: usize,
        label: TaskLabel,
        #[serde(serialize_with = "serialize_display")]
        error: TaskError,
    },
    RunCompleted {
        run_id: RunId,
        result_count: usize,
    },
}

impl DomainEvent {
    pub fn run_id(&self) -> RunId {
        match self {
            DomainEvent::RunStarted { run_id, .. }
            | DomainEvent::TaskStarted { run_id, .. }
            | DomainEvent::Note { run_id, .. }
            | DomainEvent::TaskCompleted { run_id, .. }
            | DomainEvent::TaskFailed { run_id, .. }
            | DomainEvent::RunCompleted { run_id, .. } => *run_id,
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &TaskError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

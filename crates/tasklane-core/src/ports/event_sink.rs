//! EventSink port - イベント記録の抽象化
//!
//! # 実装
//! - NoopEventSink: 何もしない
//! - TracingEventSink: tracing に流す
//! - RecordingEventSink: メモリに溜める（テスト用）

use std::sync::Mutex;

use crate::domain::DomainEvent;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DomainEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &DomainEvent) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &DomainEvent) {
        match event {
            DomainEvent::RunStarted { run_id, task_count } => {
                tracing::info!(%run_id, task_count, "run started");
            }
            DomainEvent::TaskStarted { run_id, index, label } => {
                tracing::debug!(%run_id, index, %label, "task started");
            }
            DomainEvent::Note { run_id, index, message } => {
                tracing::debug!(%run_id, index, "{message}");
            }
            DomainEvent::TaskCompleted {
                run_id,
                index,
                label,
                result,
            } => {
                tracing::debug!(%run_id, index, %label, result, "task completed");
            }
            DomainEvent::TaskFailed {
                run_id,
                index,
                label,
                error,
            } => {
                tracing::error!(%run_id, index, %label, %error, "task failed");
            }
            DomainEvent::RunCompleted {
                run_id,
                result_count,
            } => {
                tracing::info!(%run_id, result_count, "run completed");
            }
        }
    }
}

/// Keeps every emitted event in order.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &DomainEvent) {
        let mut events = match self.events.lock() {
            Ok(events) => events,
            Err(poisoned) => poisoned.into_inner(),
        };
        events.push(event.clone());
    }
}

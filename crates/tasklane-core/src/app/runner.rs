//! Runner - タスクを順番に実行する
//!
//! 1 タスクずつ: describe → evaluate → 結果を results と context に記録。
//! 途中で失敗したらそこで止まり、後続のタスクは実行しない。

use std::sync::Arc;

use crate::app::builder::Process;
use crate::domain::{Context, DomainEvent, RunError, RunReport, RunResults, StepRecord};
use crate::ports::{Clock, EventSink, IdGenerator, SystemClock, TracingEventSink, UlidGenerator};

pub struct Runner {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    sink: Arc<dyn EventSink>,
}

impl Runner {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>, sink: Arc<dyn EventSink>) -> Self {
        Self { clock, ids, sink }
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Run every task of `process` in order, threading `context` through.
    pub fn run(&self, process: &Process, mut context: Context) -> Result<RunReport, RunError> {
        let run_id = self.ids.generate_run_id();
        let span = tracing::info_span!("run", %run_id);
        let _entered = span.enter();

        let started_at = self.clock.now();
        self.sink.emit(&DomainEvent::RunStarted {
            run_id,
            task_count: process.len(),
        });

        let mut results = RunResults::new();
        let mut steps = Vec::with_capacity(process.len());

        for (index, task) in process.tasks().iter().enumerate() {
            let label = task.label().clone();
            self.sink.emit(&DomainEvent::TaskStarted {
                run_id,
                index,
                label: label.clone(),
            });
            if let Some(message) = task.describe(&context) {
                self.sink.emit(&DomainEvent::Note {
                    run_id,
                    index,
                    message,
                });
            }

            let step_started = self.clock.now();
            let result = match task.evaluate(&context) {
                Ok(result) => result,
                Err(source) => {
                    self.sink.emit(&DomainEvent::TaskFailed {
                        run_id,
                        index,
                        label: label.clone(),
                        error: source.clone(),
                    });
                    return Err(RunError::Task {
                        index,
                        label,
                        source,
                    });
                }
            };

            // 後続タスクが参照できるように context にも書き戻す
            context.insert(label.as_str(), result);
            results.record(label.clone(), result);
            steps.push(StepRecord {
                index,
                label: label.clone(),
                result,
                started_at: step_started,
                finished_at: self.clock.now(),
            });
            self.sink.emit(&DomainEvent::TaskCompleted {
                run_id,
                index,
                label,
                result,
            });
        }

        self.sink.emit(&DomainEvent::RunCompleted {
            run_id,
            result_count: results.len(),
        });

        Ok(RunReport {
            run_id,
            started_at,
            finished_at: self.clock.now(),
            steps,
            results,
            context,
        })
    }
}

impl Default for Runner {
    /// System clock, ULID ids, events to `tracing`.
    fn default() -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(UlidGenerator::new(SystemClock)),
            Arc::new(TracingEventSink),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::builder::ProcessBuilder;
    use crate::domain::{Check, TaskError, TaskLabel};
    use crate::ports::{FixedClock, RecordingEventSink};
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recording_runner() -> (Runner, Arc<RecordingEventSink>) {
        let sink = Arc::new(RecordingEventSink::new());
        let runner = Runner::default().with_sink(sink.clone());
        (runner, sink)
    }

    #[test]
    fn runs_tasks_in_order_and_records_results() {
        let process = ProcessBuilder::new()
            .task("first", Check::equals_ignore_case("weather", "cloudy"))
            .unwrap()
            .task("second", Check::equals_ignore_case("weather", "sunny"))
            .unwrap()
            .build()
            .unwrap();
        let (runner, sink) = recording_runner();

        let report = runner
            .run(&process, Context::new().with("weather", "Cloudy"))
            .unwrap();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results.get("first"), Some(true));
        assert_eq!(report.results.get("second"), Some(false));
        let indexes: Vec<usize> = report.steps.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 1]);

        let completed: Vec<usize> = sink
            .events()
            .iter()
            .filter_map(|e| match e {
                DomainEvent::TaskCompleted { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(completed, vec![0, 1]);
    }

    #[test]
    fn later_tasks_see_earlier_results() {
        let process = ProcessBuilder::new()
            .task("is cloudy", Check::equals_ignore_case("weather", "cloudy"))
            .unwrap()
            .task("saw cloudy", Check::flag("is cloudy"))
            .unwrap()
            .build()
            .unwrap();
        let (runner, _) = recording_runner();

        let report = runner
            .run(&process, Context::new().with("weather", "cloudy"))
            .unwrap();
        assert_eq!(report.results.get("saw cloudy"), Some(true));
    }

    #[test]
    fn context_only_grows() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let probe = |seen: Arc<std::sync::Mutex<Vec<Vec<String>>>>| {
            move |ctx: &Context| -> Result<bool, TaskError> {
                seen.lock().unwrap().push(ctx.keys().map(str::to_string).collect());
                Ok(true)
            }
        };
        let process = ProcessBuilder::new()
            .task("a", probe(seen.clone()))
            .unwrap()
            .task("b", probe(seen.clone()))
            .unwrap()
            .task("c", probe(seen.clone()))
            .unwrap()
            .build()
            .unwrap();
        let (runner, _) = recording_runner();

        let report = runner
            .run(&process, Context::new().with("weather", "Sunny"))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], vec!["weather"]);
        assert_eq!(seen[1], vec!["a", "weather"]);
        assert_eq!(seen[2], vec!["a", "b", "weather"]);
        for pair in seen.windows(2) {
            assert!(pair[0].iter().all(|k| pair[1].contains(k)));
        }
        assert_eq!(report.context.len(), 4);
    }

    #[test]
    fn missing_key_stops_the_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let process = ProcessBuilder::new()
            .task("weather", Check::equals_ignore_case("weather", "rainy"))
            .unwrap()
            .task("humidity", Check::equals_ignore_case("humidity", "high"))
            .unwrap()
            .task("after", move |_: &Context| -> Result<bool, TaskError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            })
            .unwrap()
            .build()
            .unwrap();
        let (runner, sink) = recording_runner();

        let err = runner
            .run(&process, Context::new().with("weather", "Rainy"))
            .unwrap_err();

        assert_eq!(
            err,
            RunError::Task {
                index: 1,
                label: TaskLabel::new("humidity"),
                source: TaskError::MissingKey {
                    key: "humidity".to_string()
                },
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let events = sink.events();
        let completed = events
            .iter()
            .filter(|e| matches!(e, DomainEvent::TaskCompleted { .. }))
            .count();
        assert_eq!(completed, 1);
        assert!(matches!(events.last(), Some(DomainEvent::TaskFailed { index: 1, .. })));
        assert!(!events.iter().any(|e| matches!(e, DomainEvent::RunCompleted { .. })));
    }

    #[test]
    fn empty_process_yields_empty_results() {
        let process = ProcessBuilder::new().build().unwrap();
        let (runner, sink) = recording_runner();
        let report = runner.run(&process, Context::new()).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn fixed_clock_makes_timestamps_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(at));
        let runner = Runner::default()
            .with_clock(clock)
            .with_id_generator(Arc::new(UlidGenerator::new(FixedClock::new(at))))
            .with_sink(Arc::new(crate::ports::NoopEventSink));
        let process = ProcessBuilder::new()
            .task("t", Check::flag("x"))
            .unwrap()
            .build()
            .unwrap();

        let report = runner.run(&process, Context::new().with("x", true)).unwrap();
        assert_eq!(report.started_at, at);
        assert_eq!(report.finished_at, at);
        assert_eq!(report.steps[0].started_at, at);
        assert!(report.run_id.to_string().starts_with("run-"));
        assert_eq!(report.run_id.as_ulid().timestamp_ms(), at.timestamp_millis() as u64);
    }
}

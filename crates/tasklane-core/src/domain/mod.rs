//! Domain model (ids, labels, context, tasks, outcomes, decisions, ...).

pub mod context;
pub mod decision;
pub mod errors;
pub mod events;
pub mod ids;
pub mod label;
pub mod outcome;
pub mod task;

pub use self::context::Context;
pub use self::decision::{Decider, Decision};
pub use self::errors::{BuildError, DecisionError, InputError, RunError, TaskError};
pub use self::events::DomainEvent;
pub use self::ids::RunId;
pub use self::label::TaskLabel;
pub use self::outcome::{RunReport, RunResults, StepRecord};
pub use self::task::{Check, Predicate, Task};

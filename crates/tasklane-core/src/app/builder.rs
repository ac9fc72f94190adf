//! ProcessBuilder - タスク列の構築と起動時検証
//!
//! # Fail-fast 設計
//! - 同じラベルの二重登録は `BuildError::DuplicateLabel`
//! - expect_labels() で期待されるラベルを登録
//! - build() 時に「期待集合 ⊆ 登録済み集合」をチェック

use crate::domain::{BuildError, Predicate, Task, TaskLabel};

/// ProcessBuilder は順序付きのタスク列を構築
///
/// # 使用例
/// ```ignore
/// let process = ProcessBuilder::new()
///     .task("Check if weather is rainy", Check::equals_ignore_case("weather", "rainy"))?
///     .expect_labels(&["Check if weather is rainy"])
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ProcessBuilder {
    tasks: Vec<Task>,
    expected_labels: Option<Vec<String>>,
}

impl ProcessBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Tasks run in the order they are added.
    pub fn task(
        self,
        label: impl Into<TaskLabel>,
        predicate: impl Predicate + 'static,
    ) -> Result<Self, BuildError> {
        self.push(Task::new(label, predicate))
    }

    pub fn push(mut self, task: Task) -> Result<Self, BuildError> {
        if self.tasks.iter().any(|t| t.label() == task.label()) {
            return Err(BuildError::DuplicateLabel(task.label().clone()));
        }
        self.tasks.push(task);
        Ok(self)
    }

    /// 期待されるラベルのリストを設定
    pub fn expect_labels(mut self, labels: &[&str]) -> Self {
        self.expected_labels = Some(labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn build(self) -> Result<Process, BuildError> {
        if let Some(expected) = &self.expected_labels {
            let missing: Vec<String> = expected
                .iter()
                .filter(|label| !self.tasks.iter().any(|t| t.label().as_str() == label.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingLabels(missing));
            }
        }
        Ok(Process { tasks: self.tasks })
    }
}

/// A validated, ordered task list.
#[derive(Debug)]
pub struct Process {
    tasks: Vec<Task>,
}

impl Process {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn labels(&self) -> impl Iterator<Item = &TaskLabel> {
        self.tasks.iter().map(Task::label)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

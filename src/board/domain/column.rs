//! Column entity holding an ordered task sequence.

use super::{BoardDomainError, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed column title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnTitle(String);

impl ColumnTitle {
    /// Creates a validated column title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnTitle`] if the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyColumnTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColumnTitle {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColumnTitle> for String {
    fn from(value: ColumnTitle) -> Self {
        value.0
    }
}

impl fmt::Display for ColumnTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display accent for a column. Any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnColor(String);

impl ColumnColor {
    const DEFAULT: &'static str = "gray";

    /// Creates a column color. Blank values fall back to the default accent.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Self::default();
        }
        Self(normalized.to_owned())
    }

    /// Returns the color as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ColumnColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for ColumnColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered bucket of tasks.
///
/// Task order is top-to-bottom display order. Columns are only mutated
/// through [`super::Board`] so the partition invariant stays intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: ColumnTitle,
    #[serde(default)]
    color: ColumnColor,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column with a fresh identifier.
    #[must_use]
    pub fn new(title: ColumnTitle, color: ColumnColor) -> Self {
        Self::with_id(ColumnId::new(), title, color)
    }

    /// Creates an empty column with a known identifier.
    #[must_use]
    pub const fn with_id(id: ColumnId, title: ColumnTitle, color: ColumnColor) -> Self {
        Self {
            id,
            title,
            color,
            tasks: Vec::new(),
        }
    }

    /// Adds tasks to the end of the column while it is being assembled.
    #[must_use]
    pub fn with_tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &ColumnTitle {
        &self.title
    }

    /// Returns the column color.
    #[must_use]
    pub const fn color(&self) -> &ColumnColor {
        &self.color
    }

    /// Returns the ordered tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the ordered task identifiers.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Returns the index of a task within this column.
    #[must_use]
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Returns `true` when the column holds the task.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.position_of(task_id).is_some()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub(super) fn set_title(&mut self, title: ColumnTitle) {
        self.title = title;
    }

    pub(super) fn adopt_identity(&mut self, canonical: Self) {
        self.id = canonical.id;
        self.title = canonical.title;
        self.color = canonical.color;
    }

    /// Inserts at `index`, clamped to the end of the column. Returns the
    /// index the task landed at.
    pub(super) fn insert_task(&mut self, index: usize, task: Task) -> usize {
        let slot = index.min(self.tasks.len());
        self.tasks.insert(slot, task);
        slot
    }

    pub(super) fn push_task(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len().saturating_sub(1)
    }

    pub(super) fn remove_task(&mut self, task_id: TaskId) -> Option<Task> {
        let index = self.position_of(task_id)?;
        Some(self.tasks.remove(index))
    }

    pub(super) fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    pub(super) fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }
}

//! Enforcement task record.
//!
//! # Invariants
//! - `title` is never empty.
//! - `updated_at` strictly advances on every mutation, status moves included.
//! - `linked_file_ids`/`linked_party_ids` are not checked against other
//!   collections and may reference deleted records.

use super::validation::require_text;
use super::vocab::{Jurisdiction, Priority, TaskCategory, TaskStatus};
use super::{advance_stamp, merge, Entity, EntityId, Timestamp, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One card on the enforcement kanban board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    pub category: TaskCategory,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_file_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_party_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_counsel_id: Option<EntityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Task {
    /// Returns whether the task still counts as open work.
    pub fn is_open(&self) -> bool {
        !self.status.is_done()
    }

    /// Returns whether the due date is strictly before `today` and the task is open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && self.due_date.is_some_and(|due| due < today)
    }
}

impl Entity for Task {
    const KIND: &'static str = "task";
    const ID_PREFIX: &'static str = "t";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "title", &self.title)
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance_stamp(self.updated_at, now);
    }
}

/// Create request for a task. Status defaults to `BACKLOG`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub jurisdiction: Option<Jurisdiction>,
    pub category: TaskCategory,
    pub status: TaskStatus,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub linked_file_ids: Vec<EntityId>,
    pub linked_party_ids: Vec<EntityId>,
    pub assigned_counsel_id: Option<EntityId>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            description: None,
            jurisdiction: None,
            category,
            status: TaskStatus::default(),
            priority: None,
            due_date: None,
            linked_file_ids: Vec::new(),
            linked_party_ids: Vec::new(),
            assigned_counsel_id: None,
        }
    }

    pub fn in_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due_on(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub(crate) fn into_task(self, id: EntityId, now: Timestamp) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            jurisdiction: self.jurisdiction,
            category: self.category,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            linked_file_ids: self.linked_file_ids,
            linked_party_ids: self.linked_party_ids,
            assigned_counsel_id: self.assigned_counsel_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a task.
///
/// `None` leaves a field untouched; for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub jurisdiction: Option<Option<Jurisdiction>>,
    pub category: Option<TaskCategory>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Option<Priority>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub linked_file_ids: Option<Vec<EntityId>>,
    pub linked_party_ids: Option<Vec<EntityId>>,
    pub assigned_counsel_id: Option<Option<EntityId>>,
}

impl TaskPatch {
    /// Patch that only moves the task to another kanban column.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, task: &mut Task) {
        merge(&mut task.title, self.title);
        merge(&mut task.description, self.description);
        merge(&mut task.jurisdiction, self.jurisdiction);
        merge(&mut task.category, self.category);
        merge(&mut task.status, self.status);
        merge(&mut task.priority, self.priority);
        merge(&mut task.due_date, self.due_date);
        merge(&mut task.linked_file_ids, self.linked_file_ids);
        merge(&mut task.linked_party_ids, self.linked_party_ids);
        merge(&mut task.assigned_counsel_id, self.assigned_counsel_id);
    }
}

//! Core types shared by the task service and the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of pending tasks returned by the recent list.
pub const RECENT_TASK_LIMIT: usize = 5;

/// A tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for create and update.
///
/// Both fields are optional on the wire; the service passes them through to
/// the store unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl TaskInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }
}

/// Confirmation body returned by every write route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub const MSG_CREATED: &str = "Task created successfully";
pub const MSG_UPDATED: &str = "Task updated successfully";
pub const MSG_COMPLETED: &str = "Task marked as completed";
pub const MSG_DELETED: &str = "Task deleted successfully";
pub const MSG_NOT_FOUND: &str = "Task not found";

/// Client-side view filter over the full task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.is_completed,
            TaskFilter::Completed => task.is_completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }

    /// Parse a filter name. Returns `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(TaskFilter::All),
            "pending" => Some(TaskFilter::Pending),
            "completed" | "done" => Some(TaskFilter::Completed),
            _ => None,
        }
    }
}

/// Completed/pending counts over a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub completed: usize,
    pub pending: usize,
}

impl TaskCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.is_completed).count();
        Self {
            completed,
            pending: tasks.len() - completed,
        }
    }
}

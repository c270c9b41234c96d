use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// A task row as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: Uuid,
    /// Owner of the task. Tasks are only ever visible through operations
    /// scoped to this id.
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
    /// Ordered labels attached to the task.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,

    /// Defaults to false when omitted.
    #[serde(default)]
    pub completed: bool,

    /// Defaults to medium when omitted.
    pub priority: Option<TaskPriority>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload for a partial task update. Fields left unset are not touched.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub tags: Option<Vec<String>>,
}

/// Completion filter for task listings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Completed,
    Incomplete,
}

/// Query parameters for listing tasks. Omitted filters are no-ops; provided
/// filters combine with logical AND.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TaskQuery {
    pub status: Option<StatusFilter>,
    pub priority: Option<TaskPriority>,
}

/// Query parameter for the completion toggle endpoint.
#[derive(Debug, Deserialize)]
pub struct CompletionQuery {
    pub completed: bool,
}

/// Envelope for a single-task response.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub data: Task,
}

/// Envelope for a task-list response.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub success: bool,
    pub data: Vec<Task>,
}

/// Envelope for operations that return a message rather than a record.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

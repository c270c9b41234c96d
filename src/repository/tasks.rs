//! Owner-scoped task persistence.
//!
//! Every query filters by `user_id` in the same statement that reads or
//! writes the row, so a task owned by someone else is indistinguishable
//! from a task that does not exist, and each mutation's read-verify-write
//! sequence is a single atomic statement at the storage engine.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{StatusFilter, Task, TaskCreate, TaskQuery, TaskUpdate};

const TASK_COLUMNS: &str =
    "id, user_id, title, description, completed, priority, tags, created_at, updated_at";

pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new task for `owner_id`, applying the medium-priority
    /// default, and returns the full persisted record.
    pub async fn create(&self, owner_id: Uuid, input: TaskCreate) -> Result<Task, AppError> {
        let priority = input.priority.unwrap_or_default();

        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (id, user_id, title, description, completed, priority, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.completed)
        .bind(priority)
        .bind(input.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Fetches a single task if it exists and belongs to `owner_id`.
    pub async fn get(&self, owner_id: Uuid, task_id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE user_id = $1 AND id = $2",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Lists the owner's tasks, applying the optional status and priority
    /// filters (logical AND). Ordered by creation time ascending, i.e.
    /// insertion order, so listings are deterministic.
    pub async fn list(&self, owner_id: Uuid, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let mut sql = format!("SELECT {} FROM tasks WHERE user_id = $1", TASK_COLUMNS);
        let mut param_count = 2;

        if query.status.is_some() {
            sql.push_str(&format!(" AND completed = ${}", param_count));
            param_count += 1;
        }
        if query.priority.is_some() {
            sql.push_str(&format!(" AND priority = ${}", param_count));
        }
        sql.push_str(" ORDER BY created_at ASC");

        let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(owner_id);

        if let Some(status) = query.status {
            query_builder = query_builder.bind(status == StatusFilter::Completed);
        }
        if let Some(priority) = query.priority {
            query_builder = query_builder.bind(priority);
        }

        let tasks = query_builder.fetch_all(&self.pool).await?;

        Ok(tasks)
    }

    /// Applies a partial update to an owned task.
    ///
    /// Only provided fields change; the rest keep their prior values via
    /// COALESCE, and `updated_at` is refreshed. The owner check and the
    /// write happen in one statement, so there is no lost-update window.
    pub async fn update(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        input: &TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET \
                 title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 completed = COALESCE($5, completed), \
                 priority = COALESCE($6, priority), \
                 tags = COALESCE($7, tags), \
                 updated_at = NOW() \
             WHERE user_id = $1 AND id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .bind(task_id)
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.completed)
        .bind(input.priority)
        .bind(input.tags.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Deletes an owned task. Returns whether a row was removed.
    pub async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1 AND id = $2")
            .bind(owner_id)
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets only the `completed` flag on an owned task. Kept separate from
    /// [`update`](Self::update) so the check-off path stays cheap and
    /// explicit.
    pub async fn set_completion(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        completed: bool,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET completed = $3, updated_at = NOW() \
             WHERE user_id = $1 AND id = $2 \
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(owner_id)
        .bind(task_id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }
}

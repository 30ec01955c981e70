use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};

const TASK_COLUMNS: &str = "id, user_id, title, description, completed, created_at, updated_at";

/// Ownership predicate shared by every statement. `$1` is always the owner id.
const OWNER_SCOPE: &str = "user_id = $1";

/// Task persistence for a single owner.
///
/// A repository is bound to the acting user when it is created, and every
/// query it issues is filtered by [`OWNER_SCOPE`]. A task owned by someone
/// else is indistinguishable from a task that does not exist.
pub struct TaskRepository<'a> {
    pool: &'a SqlitePool,
    owner_id: i64,
}

impl<'a> TaskRepository<'a> {
    pub fn for_owner(pool: &'a SqlitePool, owner_id: i64) -> Self {
        Self { pool, owner_id }
    }

    /// Tasks owned by the caller in insertion order.
    pub async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE {OWNER_SCOPE} ORDER BY id ASC"
        ))
        .bind(self.owner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn create(&self, input: CreateTaskRequest) -> Result<Task, AppError> {
        let now = Utc::now();
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (user_id, title, description, completed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(self.owner_id)
        .bind(input.title)
        .bind(input.description.unwrap_or_default())
        .bind(input.completed.unwrap_or(false))
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(task)
    }

    pub async fn get(&self, task_id: i64) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE {OWNER_SCOPE} AND id = $2"
        ))
        .bind(self.owner_id)
        .bind(task_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(task_not_found)
    }

    /// Applies the fields present in `changes` and bumps `updated_at`.
    pub async fn update(&self, task_id: i64, changes: UpdateTaskRequest) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = COALESCE($3, title), \
                 description = COALESCE($4, description), \
                 completed = COALESCE($5, completed), \
                 updated_at = $6 \
             WHERE {OWNER_SCOPE} AND id = $2 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(self.owner_id)
        .bind(task_id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.completed)
        .bind(Utc::now())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(task_not_found)
    }

    pub async fn delete(&self, task_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM tasks WHERE {OWNER_SCOPE} AND id = $2"))
            .bind(self.owner_id)
            .bind(task_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(task_not_found());
        }
        Ok(())
    }
}

fn task_not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}

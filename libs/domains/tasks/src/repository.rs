use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task};

/// Repository trait for Task persistence
///
/// This trait defines the data access interface for tasks.
/// Implementations can use different storage backends (PostgreSQL, in-memory, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task and return it as stored (id and timestamps assigned)
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID, `None` when absent or soft-deleted
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// List all live tasks
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Persist an already-merged task; refreshes `updated_at`
    async fn update(&self, task: Task) -> TaskResult<Task>;

    /// Soft-delete a task by ID
    async fn delete(&self, id: i64) -> TaskResult<()>;
}

struct StoredTask {
    task: Task,
    deleted: bool,
}

/// In-memory Task repository for tests and local development.
///
/// Mirrors the store contract of [`PgTaskRepository`](crate::PgTaskRepository):
/// sequential ids starting at 1, soft-deleted rows retained but invisible,
/// `updated_at` refreshed on every mutation.
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    tasks: BTreeMap<i64, StoredTask>,
    next_id: i64,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let now = Utc::now();
        let task = Task {
            id: inner.next_id,
            title: input.title,
            description: input.description,
            done: input.done,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.insert(
            task.id,
            StoredTask {
                task: task.clone(),
                deleted: false,
            },
        );
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .get(&id)
            .filter(|stored| !stored.deleted)
            .map(|stored| stored.task.clone()))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .values()
            .filter(|stored| !stored.deleted)
            .map(|stored| stored.task.clone())
            .collect())
    }

    async fn update(&self, mut task: Task) -> TaskResult<Task> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .tasks
            .get_mut(&task.id)
            .filter(|stored| !stored.deleted)
            .ok_or(TaskError::NotFound(task.id))?;
        task.updated_at = Utc::now();
        stored.task = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.tasks.get_mut(&id) {
            stored.deleted = true;
            stored.task.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: String::new(),
            done: false,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryTaskRepository::new();

        let first = repo.create(create_input("first")).await.unwrap();
        let second = repo.create(create_input("second")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleted_task_is_invisible() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(create_input("ephemeral")).await.unwrap();

        repo.delete(task.id).await.unwrap();

        assert!(repo.get_by_id(task.id).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(create_input("once")).await.unwrap();

        repo.delete(task.id).await.unwrap();
        repo.delete(task.id).await.unwrap();
        repo.delete(12345).await.unwrap();
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepository::new();
        let first = repo.create(create_input("first")).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(create_input("second")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at() {
        let repo = InMemoryTaskRepository::new();
        let mut task = repo.create(create_input("stale")).await.unwrap();
        let created_at = task.created_at;

        task.title = "fresh".to_string();
        let updated = repo.update(task).await.unwrap();

        assert_eq!(updated.title, "fresh");
        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);
    }

    #[tokio::test]
    async fn test_update_deleted_task_fails() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(create_input("gone")).await.unwrap();
        repo.delete(task.id).await.unwrap();

        let result = repo.update(task).await;
        assert!(matches!(result, Err(TaskError::NotFound(_))));
    }
}

use std::sync::Arc;

use crate::{
    error::{TaskError, TaskResult},
    models::{CreateTask, Task, UpdateTask},
    repository::TaskRepository,
};

/// Task Service - business rules on top of the repository.
///
/// Existence checks for update and delete live here, not in the store: both
/// operations first fetch the task and turn an absent row into `NotFound`
/// before any write is attempted.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task
    pub async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let task = self.repository.create(input).await?;

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    /// Get a task by ID
    pub async fn get(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List all tasks
    pub async fn list(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Update a task, merging the sparse input into the stored state
    pub async fn update(&self, id: i64, input: UpdateTask) -> TaskResult<Task> {
        let mut task = self.get(id).await?;

        task.apply_update(input);
        let task = self.repository.update(task).await?;

        tracing::info!(task_id = id, "Updated task");
        Ok(task)
    }

    /// Delete a task
    pub async fn delete(&self, id: i64) -> TaskResult<()> {
        // 404 for an unknown id even though the store delete itself
        // tolerates one.
        self.get(id).await?;
        self.repository.delete(id).await?;

        tracing::info!(task_id = id, "Deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTaskRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_task(id: i64) -> Task {
        Task {
            id,
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            done: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_task_is_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .with(eq(7))
            .returning(|_| Ok(None));

        let service = TaskService::new(repo);
        let result = service.get(7).await;

        assert!(matches!(result, Err(TaskError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_update_merges_before_persisting() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(sample_task(id))));
        repo.expect_update()
            .withf(|task| {
                task.title == "New title"
                    && task.description == "Quarterly numbers"
                    && task.done
            })
            .returning(|task| Ok(task));

        let service = TaskService::new(repo);
        let updated = service
            .update(
                1,
                UpdateTask {
                    title: Some("New title".to_string()),
                    description: Some(String::new()),
                    done: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert!(updated.done);
    }

    #[tokio::test]
    async fn test_update_missing_task_skips_persist() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = TaskService::new(repo);
        let result = service.update(5, UpdateTask::default()).await;

        assert!(matches!(result, Err(TaskError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_delete_checks_existence_first() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let service = TaskService::new(repo);
        let result = service.delete(3).await;

        assert!(matches!(result, Err(TaskError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_delete_existing_task() {
        let mut repo = MockTaskRepository::new();
        repo.expect_get_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(sample_task(id))));
        repo.expect_delete()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));

        let service = TaskService::new(repo);
        assert!(service.delete(2).await.is_ok());
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list()
            .returning(|| Err(TaskError::Database("Failed to retrieve tasks".to_string())));

        let service = TaskService::new(repo);
        let result = service.list().await;

        assert!(matches!(result, Err(TaskError::Database(_))));
    }
}

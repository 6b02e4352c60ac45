use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task},
    repository::TaskRepository,
};

/// PostgreSQL-backed Task repository.
///
/// Soft-deleted rows are filtered here; no query in this module ever returns
/// a tombstoned task. The short `Database` messages are what callers see on
/// the wire; the underlying cause goes to the log only.
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();

        // Insert, then read the row back so id and the backend-computed
        // timestamps come from the database rather than this process.
        let inserted = entity::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to insert task");
                TaskError::Database("Failed to create task".to_string())
            })?;

        let model = entity::Entity::find_by_id(inserted.last_insert_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to read back created task");
                TaskError::Database("Failed to create task".to_string())
            })?
            .ok_or_else(|| {
                tracing::error!(
                    task_id = inserted.last_insert_id,
                    "Created task vanished before read-back"
                );
                TaskError::Database("Failed to create task".to_string())
            })?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, task_id = id, "Failed to query task");
                TaskError::Database("Failed to retrieve task".to_string())
            })?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Deleted.eq(false))
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to query tasks");
                TaskError::Database("Failed to retrieve tasks".to_string())
            })?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let active_model = entity::ActiveModel {
            id: Unchanged(task.id),
            title: Set(task.title),
            description: Set(task.description),
            done: Set(task.done),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };

        let model = active_model.update(&self.db).await.map_err(|e| {
            tracing::error!(error = %e, task_id = task.id, "Failed to update task");
            TaskError::Database("Failed to update task".to_string())
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> TaskResult<()> {
        // Tombstone rather than remove; repeat deletes simply match no rows.
        entity::Entity::update_many()
            .col_expr(entity::Column::Deleted, Expr::value(true))
            .col_expr(
                entity::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Deleted.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, task_id = id, "Failed to delete task");
                TaskError::Database("Failed to delete task".to_string())
            })?;

        Ok(())
    }
}

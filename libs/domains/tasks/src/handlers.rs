use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use utoipa::OpenApi;

use crate::{
    error::TaskResult,
    models::{CreateTask, Task, UpdateTask},
    repository::TaskRepository,
    service::TaskService,
};

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(create_task, list_tasks, get_task, update_task, delete_task),
    components(schemas(Task, CreateTask, UpdateTask, ErrorResponse)),
    tags(
        (name = "tasks", description = "Task management endpoints")
    )
)]
pub struct ApiDoc;

/// Create Axum router for task endpoints
pub fn router<R>(service: TaskService<R>) -> Router
where
    R: TaskRepository + 'static,
{
    let service = Arc::new(service);

    Router::new()
        .route("/", post(create_task).get(list_tasks))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(service)
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn create_task<R>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository,
{
    let task = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "All live tasks", body = [Task]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn list_tasks<R>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository,
{
    let tasks = service.list().await?;
    Ok(Json(tasks))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn get_task<R>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository,
{
    let task = service.get(id).await?;
    Ok(Json(task))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid task ID or request body", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn update_task<R>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository,
{
    let task = service.update(id, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i64, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted", body = String),
        (status = 400, description = "Invalid task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
async fn delete_task<R>(
    State(service): State<Arc<TaskService<R>>>,
    IdPath(id): IdPath,
) -> TaskResult<impl IntoResponse>
where
    R: TaskRepository,
{
    service.delete(id).await?;
    Ok(Json("Task deleted successfully"))
}

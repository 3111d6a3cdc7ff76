use crate::auth::auth_dto::MessageResponse;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::task::task_dto::{CreateTaskRequest, ListTasksQuery, TaskListResponse, UpdateTaskRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

/// Create a task for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = MessageResponse),
        (status = 400, description = "Missing title or description"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store failure")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    let title = payload
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Missing title or description".to_string()))?;
    let description = payload
        .description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Missing title or description".to_string()))?;

    state
        .task_service
        .create_task(&user.email, &title, &description, payload.reminder_time)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Task created"))))
}

/// List the authenticated user's tasks with filtering, sorting and
/// pagination.
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1"),
        ("size" = Option<String>, Query, description = "Page size, default 10"),
        ("status" = Option<String>, Query, description = "completed or pending"),
        ("sortBy" = Option<String>, Query, description = "Field to sort by"),
        ("sortOrder" = Option<String>, Query, description = "asc (default) or desc")
    ),
    responses(
        (status = 200, description = "Tasks for the user", body = TaskListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store failure")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskListResponse>> {
    let tasks = state.task_service.list_tasks(&user.email, &query).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Apply a partial update to a task.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = MessageResponse),
        (status = 400, description = "Invalid task id"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store failure")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn edit_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(updates): Json<UpdateTaskRequest>,
) -> Result<Json<MessageResponse>> {
    state.task_service.edit_task(&task_id, updates).await?;
    Ok(Json(MessageResponse::new("Task updated successfully")))
}

/// Flip a task's completion flag.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/done",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task status toggled", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Store failure")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn toggle_task_completion(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.task_service.toggle_task_completion(&task_id).await?;
    Ok(Json(MessageResponse::new("Task status toggled")))
}

/// Delete a task by id.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Store failure")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.task_service.delete_task(&task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted")))
}

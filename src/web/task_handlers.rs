// src/web/task_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::task::{EditTaskForm, NewTaskForm, UpdateTaskPayload, UpdateTaskResponse},
    services::task_service,
    state::AppState,
    web::{feedback::redirect_with, mw_auth::UserId},
};
use axum::{
    extract::{Extension, Form, Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

// POST /update_task  {id, completed} -> {success}
pub async fn handle_update_task(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Json(payload): Json<UpdateTaskPayload>,
) -> AppResult<Response> {
    match task_service::set_completed(&state.db_pool, user_id, payload.id, payload.completed).await {
        Ok(()) => Ok(Json(UpdateTaskResponse { success: true }).into_response()),
        Err(AppError::NotFound(what)) => {
            tracing::warn!("POST /update_task: {} não existe para user {}", what, user_id);
            Ok((StatusCode::NOT_FOUND, Json(UpdateTaskResponse { success: false })).into_response())
        }
        Err(e) => Err(e),
    }
}

// POST /tasks
pub async fn handle_add_task(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<NewTaskForm>,
) -> AppResult<Redirect> {
    let outcome = task_service::add_task(&state.db_pool, user_id, &form.text, &form.day)
        .await
        .map(|_| "Tarefa adicionada.".to_string());
    redirect_with("/", outcome)
}

// POST /tasks/{id}/edit
pub async fn handle_edit_task(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(task_id): Path<i64>,
    Form(form): Form<EditTaskForm>,
) -> AppResult<Redirect> {
    let outcome = task_service::update_text(&state.db_pool, user_id, task_id, &form.text)
        .await
        .map(|_| "Tarefa atualizada.".to_string());
    redirect_with("/", outcome)
}

// POST /tasks/{id}/delete
pub async fn handle_delete_task(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(task_id): Path<i64>,
) -> AppResult<Redirect> {
    let outcome = task_service::delete_task(&state.db_pool, user_id, task_id)
        .await
        .map(|_| "Tarefa apagada.".to_string());
    redirect_with("/", outcome)
}

// POST /tasks/clear_completed
pub async fn handle_clear_completed(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Redirect> {
    let outcome = task_service::clear_completed(&state.db_pool, user_id)
        .await
        .map(|n| format!("{} tarefas concluídas removidas.", n));
    redirect_with("/", outcome)
}

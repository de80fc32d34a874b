// src/web/home_handlers.rs
use crate::{
    error::{AppError, AppResult},
    grid::time,
    services::{points_service, schedule_service, task_service, user_service},
    state::AppState,
    templates::{format_date_header, GridRowView, IndexPage, TaskView},
    web::{feedback::FeedbackParams, mw_auth::UserId},
};
use askama::Template;
use axum::{
    extract::{Extension, Query, State},
    response::Html,
};
use chrono::Local;

// GET / : grelha + tarefas + pontos
pub async fn index_page(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Html<String>> {
    tracing::debug!("GET /: Acesso para {}", user_id);

    let user = user_service::find_user_by_id(&state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            // Sessão válida para um utilizador que já não existe
            tracing::error!("user_id {} autenticado não encontrado na DB!", user_id);
            AppError::Unauthorized
        })?;

    let grid = schedule_service::load_grid(&state.db_pool, user_id).await?;
    let tasks = task_service::list_tasks(&state.db_pool, user_id).await?;
    let points = points_service::summary(&state.db_pool, user_id).await?;

    let now = Local::now().naive_local();
    let template = IndexPage {
        user_name: user.name,
        date_str: format_date_header(now.date()),
        hours: time::hour_labels(),
        rows: GridRowView::from_grid(&grid),
        days: IndexPage::day_options(),
        tasks: tasks.iter().map(TaskView::from).collect(),
        task_days: IndexPage::task_day_options(),
        points_total: points.total,
        points_latest: IndexPage::describe_latest(&points),
        weekly_message: points_service::weekly_status(now, points.total).map(|s| s.message()),
        success_message: params.success,
        error_message: params.error,
    };

    Ok(Html(template.render()?))
}

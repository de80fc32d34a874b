// src/web/schedule_handlers.rs
use crate::{
    error::AppResult,
    grid::{Day, Selection},
    models::schedule::{CellForm, LectureForm, MergeForm},
    services::schedule_service,
    state::AppState,
    web::{feedback::redirect_with, mw_auth::UserId},
};
use axum::{
    extract::{Extension, Form, State},
    response::Redirect,
};
use sqlx::SqlitePool;

// POST /schedule/lecture
pub async fn handle_set_lecture(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<LectureForm>,
) -> AppResult<Redirect> {
    redirect_with("/", set_lecture(&state.db_pool, user_id, &form).await)
}

// POST /schedule/clear
pub async fn handle_clear_cell(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<CellForm>,
) -> AppResult<Redirect> {
    redirect_with("/", clear_cell(&state.db_pool, user_id, &form).await)
}

// POST /schedule/merge
pub async fn handle_merge(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<MergeForm>,
) -> AppResult<Redirect> {
    redirect_with("/", merge(&state.db_pool, user_id, &form).await)
}

// POST /schedule/unmerge
pub async fn handle_unmerge(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<CellForm>,
) -> AppResult<Redirect> {
    redirect_with("/", unmerge(&state.db_pool, user_id, &form).await)
}

async fn set_lecture(db_pool: &SqlitePool, user_id: i64, form: &LectureForm) -> AppResult<String> {
    let day: Day = form.day.parse()?;
    schedule_service::set_lecture(db_pool, user_id, day, &form.time, &form.name, &form.color).await?;
    Ok("Aula adicionada.".to_string())
}

async fn clear_cell(db_pool: &SqlitePool, user_id: i64, form: &CellForm) -> AppResult<String> {
    let day: Day = form.day.parse()?;
    schedule_service::clear_cell(db_pool, user_id, day, &form.time).await?;
    Ok("Célula limpa.".to_string())
}

async fn merge(db_pool: &SqlitePool, user_id: i64, form: &MergeForm) -> AppResult<String> {
    let day: Day = form.day.parse()?;
    let selection = Selection::at(day, &form.time, form.rows, form.cols)?;
    schedule_service::merge_cells(db_pool, user_id, selection, &form.name, &form.color).await?;
    Ok("Células fundidas com sucesso.".to_string())
}

async fn unmerge(db_pool: &SqlitePool, user_id: i64, form: &CellForm) -> AppResult<String> {
    let day: Day = form.day.parse()?;
    schedule_service::unmerge_cell(db_pool, user_id, day, &form.time).await?;
    Ok("Fusão desfeita com sucesso.".to_string())
}

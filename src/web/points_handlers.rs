// src/web/points_handlers.rs
use crate::{
    error::AppResult,
    models::points::PointsForm,
    services::points_service,
    state::AppState,
    web::{feedback::redirect_with, mw_auth::UserId},
};
use axum::{
    extract::{Extension, Form, State},
    response::Redirect,
};

// POST /points
pub async fn handle_add_points(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Form(form): Form<PointsForm>,
) -> AppResult<Redirect> {
    let outcome = match points_service::parse_points(&form.points) {
        Ok(points) => points_service::add_points(&state.db_pool, user_id, points)
            .await
            .map(|_| format!("{} pontos adicionados.", points)),
        Err(e) => Err(e),
    };
    redirect_with("/", outcome)
}

// POST /points/reset
pub async fn handle_reset_points(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Redirect> {
    let outcome = points_service::reset_points(&state.db_pool, user_id)
        .await
        .map(|_| "Pontos reiniciados a zero.".to_string());
    redirect_with("/", outcome)
}

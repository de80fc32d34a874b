// src/web/routes.rs
use crate::{
    state::AppState,
    web::{
        auth_handlers, file_handlers, home_handlers, mw_auth, points_handlers, schedule_handlers,
        task_handlers,
    },
};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login))
        .route("/logout", get(auth_handlers::handle_logout));

    // Horário (grelha): fundir, separar e editar células
    let schedule_routes = Router::new()
        .route("/lecture", post(schedule_handlers::handle_set_lecture))
        .route("/clear", post(schedule_handlers::handle_clear_cell))
        .route("/merge", post(schedule_handlers::handle_merge))
        .route("/unmerge", post(schedule_handlers::handle_unmerge));

    let task_routes = Router::new()
        .route("/", post(task_handlers::handle_add_task))
        .route("/{id}/edit", post(task_handlers::handle_edit_task))
        .route("/{id}/delete", post(task_handlers::handle_delete_task))
        .route("/clear_completed", post(task_handlers::handle_clear_completed));

    let file_routes = Router::new()
        .route("/", get(file_handlers::list_files_page))
        .route(
            "/upload",
            post(file_handlers::handle_upload).layer(DefaultBodyLimit::max(file_handlers::MAX_UPLOAD_BYTES)),
        )
        .route("/clear", post(file_handlers::handle_clear_files));

    let points_routes = Router::new()
        .route("/", post(points_handlers::handle_add_points))
        .route("/reset", post(points_handlers::handle_reset_points));

    // --- Rotas Autenticadas ---
    let authenticated_routes = Router::new()
        .route("/", get(home_handlers::index_page))
        // Checkbox das tarefas (fetch JSON)
        .route("/update_task", post(task_handlers::handle_update_task))
        .route("/Uploads/{filename}", get(file_handlers::download_file))
        .nest("/schedule", schedule_routes)
        .nest("/tasks", task_routes)
        .nest("/files", file_routes)
        .nest("/points", points_routes)
        // require_auth em TODAS as rotas acima (incluindo as aninhadas)
        .route_layer(middleware::from_fn(mw_auth::require_auth));

    // --- Router Final ---
    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

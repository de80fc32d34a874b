// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::LoginForm,
    services::auth_service,
    state::AppState,
    templates::LoginPage,
    web::mw_auth::SESSION_USER_KEY,
};
use askama::Template; // Trait Template para render()
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /login
pub async fn show_login_form(session: Session) -> AppResult<Response> {
    // Já existe sessão? Vai direto para a grelha
    if session.get::<i64>(SESSION_USER_KEY).await.ok().flatten().is_some() {
        tracing::debug!("GET /login: Utilizador já logado, redirecionando para /");
        return Ok(Redirect::to("/").into_response());
    }
    render_login(None)
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    tracing::info!("Tentativa de login para: {}", form.username.trim());

    match auth_service::authenticate(&state.db_pool, &form.username, &form.password).await {
        Ok(user) => {
            session
                .cycle_id()
                .await // Gera novo ID de sessão (segurança)
                .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
            session
                .insert(SESSION_USER_KEY, user.id)
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::InvalidCredentials) => render_login(Some("Utilizador ou senha inválidos.".to_string())),
        Err(AppError::Validation(msg)) => render_login(Some(msg)),
        Err(e) => {
            tracing::error!("Erro no login de {}: {:?}", form.username, e);
            Err(e)
        }
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get(SESSION_USER_KEY).await.ok().flatten();

    // Apaga todos os dados da sessão atual
    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    if let Some(id) = user_id {
        tracing::info!("🚪 Utilizador {} desligado.", id);
    } else {
        tracing::info!("🚪 Sessão anónima desligada.");
    }

    Ok(Redirect::to("/login"))
}

fn render_login(error: Option<String>) -> AppResult<Response> {
    let html = LoginPage { error }.render()?;
    Ok(Html(html).into_response())
}

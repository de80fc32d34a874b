// src/web/mw_auth.rs
use crate::error::AppError;
use axum::{
    extract::Request, // Usar Request em vez de Parts para ter extensões
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da sessão onde guardamos o ID do utilizador autenticado.
pub const SESSION_USER_KEY: &str = "user_id";

// Middleware que verifica se o utilizador está logado
pub async fn require_auth(
    session: Session,     // Extrai a sessão atual
    mut request: Request, // A requisição original (mutável para adicionar extensões)
    next: Next,
) -> Result<Response, AppError> {
    match session.get::<i64>(SESSION_USER_KEY).await {
        Ok(Some(user_id)) => {
            tracing::debug!("Autenticação MW: Utilizador {} autenticado. Prosseguindo...", user_id);
            // Os handlers protegidos leem o ID via Extension<UserId>
            request.extensions_mut().insert(UserId(user_id));
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::debug!("Autenticação MW: Não autenticado. Redirecionando para /login");
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => {
            // Erro ao tentar ler a sessão (ex: problema na DB)
            tracing::error!("Autenticação MW: Erro ao ler sessão: {:?}", e);
            Err(AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))
        }
    }
}

// ID do utilizador autenticado, guardado nas extensões da requisição
#[derive(Clone, Copy, Debug)]
pub struct UserId(pub i64);

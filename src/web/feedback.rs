// src/web/feedback.rs
//! Padrão Post/Redirect/Get: o resultado de uma ação volta à página de
//! origem como `?success=...` ou `?error=...`.
use crate::error::AppResult;
use axum::response::Redirect;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct FeedbackParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Erros do utilizador (dados inválidos, fusão impossível, ...) viram
/// mensagem na página; os restantes seguem para o `IntoResponse` de AppError.
pub fn redirect_with(path: &str, outcome: AppResult<String>) -> AppResult<Redirect> {
    match outcome {
        Ok(message) => {
            let redirect_url = format!("{}?success={}", path, urlencoding::encode(&message));
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!("Ação recusada ({}): {}", path, e);
            let redirect_url = format!("{}?error={}", path, urlencoding::encode(&e.to_string()));
            Ok(Redirect::to(&redirect_url))
        }
        Err(e) => Err(e),
    }
}

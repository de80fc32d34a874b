// src/error.rs
use crate::grid::GridError;
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de configuração: {0}")]
    ConfigError(String),

    #[error("Erro de ficheiro: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro ao gerar a página: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro no envio do ficheiro: {0}")]
    UploadError(String),

    // Erros da grelha (fusão/separação, dia ou cor inválidos)
    #[error("{0}")]
    GridError(#[from] GridError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("O nome de utilizador '{0}' já existe")]
    DuplicateUsername(String),

    #[error("Dados inválidos: {0}")]
    Validation(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,

    #[error("Não autorizado")]
    Unauthorized,
}

impl AppError {
    /// Erro causado pelo pedido do utilizador (4xx), mostrado como aviso.
    pub fn is_client_error(&self) -> bool {
        self.status_and_message().0.is_client_error()
    }

    /// Estado HTTP e mensagem segura para mostrar ao utilizador.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.".into())
            }
            AppError::ConfigError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.".into()),
            AppError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos ficheiros.".into()),
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao carregar a página.".into())
            }
            AppError::UploadError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::GridError(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.".into())
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Utilizador ou senha inválidos.".into()),
            AppError::DuplicateUsername(_) | AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.".into())
            }
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "Não autorizado.".into()),
            AppError::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".into())
            }
        }
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = self.status_and_message();

        // Página HTML simples; não depende dos templates para não falhar outra vez
        (status, Html(format!(r#"
            <!DOCTYPE html><html lang="pt"><head><meta charset="utf-8"><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="javascript:history.back()">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = escape_html(&user_message)))).into_response()
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_keep_their_message() {
        let (status, msg) = AppError::DuplicateUsername("ana".into()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("ana"));

        let (status, msg) = AppError::from(GridError::SingleCell).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, GridError::SingleCell.to_string());
    }

    #[test]
    fn internal_errors_are_not_leaked() {
        let (status, msg) = AppError::ConfigError("DATABASE_URL=segredo".into()).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("segredo"));
    }
}

// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::user_service,
};
use sqlx::SqlitePool;

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let (password, stored_hash) = (password.to_string(), stored_hash.to_string());
    run_bcrypt("verify", move || bcrypt::verify(&password, &stored_hash)).await
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    run_bcrypt("hash", move || bcrypt::hash(&password, bcrypt::DEFAULT_COST)).await
}

// bcrypt é lento de propósito: corre fora das threads do runtime
async fn run_bcrypt<T, F>(op: &'static str, work: F) -> AppResult<T>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| {
            tracing::error!("Erro na task spawn_blocking (bcrypt {}): {:?}", op, e);
            AppError::InternalServerError
        })?
        .map_err(|e| {
            tracing::error!("Erro bcrypt ({}): {:?}", op, e);
            AppError::PasswordHashingError
        })
}

/// Login: devolve o utilizador se o par username/senha for válido.
/// Utilizador inexistente e senha errada dão o mesmo erro.
pub async fn authenticate(db_pool: &SqlitePool, username: &str, password: &str) -> AppResult<User> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation("É preciso indicar utilizador e senha".into()));
    }

    let Some(user) = user_service::find_user_by_username(db_pool, username).await? else {
        tracing::warn!("Utilizador não encontrado: {}", username);
        return Err(AppError::InvalidCredentials);
    };

    if verify_password(password, &user.password_hash).await? {
        tracing::info!("✅ Login bem-sucedido para: {}", user.username);
        Ok(user)
    } else {
        tracing::warn!("Senha incorreta para: {}", username);
        Err(AppError::InvalidCredentials)
    }
}

// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserSummary},
    services::auth_service,
};
use sqlx::SqlitePool;

/// Tamanho mínimo da senha aceite na criação/alteração.
pub const MIN_PASSWORD_LEN: usize = 4;

pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por username: {}", username);
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, username, password_hash, created_at FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, username, password_hash, created_at FROM users WHERE id = ?1",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(user)
}

/// Todos os utilizadores, sem o hash.
pub async fn find_all_users(db_pool: &SqlitePool) -> AppResult<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>("SELECT id, name, username FROM users ORDER BY id ASC")
        .fetch_all(db_pool)
        .await?;
    tracing::debug!("Encontrados {} utilizadores.", users.len());
    Ok(users)
}

/// Cria um utilizador. O username repetido é recusado antes do INSERT
/// (e a constraint UNIQUE cobre a corrida entre dois pedidos).
pub async fn create_user(db_pool: &SqlitePool, name: &str, username: &str, raw_password: &str) -> AppResult<i64> {
    let name = name.trim();
    let username = username.trim();
    if name.is_empty() || username.is_empty() {
        return Err(AppError::Validation("Nome e username são obrigatórios".into()));
    }
    if raw_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "A senha precisa de pelo menos {} caracteres",
            MIN_PASSWORD_LEN
        )));
    }

    tracing::info!("Tentando criar utilizador: {}", username);
    if find_user_by_username(db_pool, username).await?.is_some() {
        tracing::warn!("Falha ao criar user: '{}' já existe.", username);
        return Err(AppError::DuplicateUsername(username.to_string()));
    }

    let password_hash = auth_service::hash_password(raw_password).await?;

    let result = sqlx::query("INSERT INTO users (name, username, password_hash) VALUES (?1, ?2, ?3)")
        .bind(name)
        .bind(username)
        .bind(&password_hash)
        .execute(db_pool)
        .await;

    match result {
        Ok(done) => {
            let id = done.last_insert_rowid();
            tracing::info!("✅ Utilizador '{}' criado com ID {}.", username, id);
            Ok(id)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            tracing::warn!("Falha ao criar user: '{}' já existe (constraint).", username);
            Err(AppError::DuplicateUsername(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Apaga o utilizador; horário, tarefas, ficheiros e pontos vão com ele
/// (ON DELETE CASCADE). Os ficheiros em disco são da responsabilidade do
/// `file_service::clear_files`.
pub async fn delete_user(db_pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    tracing::info!("Apagando utilizador {}", user_id);
    let rows_affected = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao apagar: utilizador {} não encontrado.", user_id);
        return Err(AppError::NotFound(format!("utilizador {}", user_id)));
    }
    tracing::info!("✅ Utilizador {} apagado.", user_id);
    Ok(())
}

pub async fn update_user_password(db_pool: &SqlitePool, user_id: i64, new_raw_password: &str) -> AppResult<()> {
    if new_raw_password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "A senha precisa de pelo menos {} caracteres",
            MIN_PASSWORD_LEN
        )));
    }
    tracing::info!("Tentando alterar senha para user: {}", user_id);
    let new_password_hash = auth_service::hash_password(new_raw_password).await?;

    let rows_affected = sqlx::query("UPDATE users SET password_hash = ?1 WHERE id = ?2")
        .bind(new_password_hash)
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        tracing::warn!("Falha ao alterar senha: utilizador {} não encontrado.", user_id);
        Err(AppError::NotFound(format!("utilizador {}", user_id)))
    } else {
        tracing::info!("✅ Senha alterada com sucesso para user: {}", user_id);
        Ok(())
    }
}

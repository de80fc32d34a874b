// src/db.rs
use crate::{config::SeedUser, error::AppResult, services::user_service};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration; // Usar std::time::Duration aqui

/// Abre o pool e executa as migrações embutidas.
pub async fn create_db_pool(database_url: &str, max_connections: u32) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", database_url);

    // Opções de conexão (criar se não existir, timeout, chaves estrangeiras para o CASCADE)
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Pool em memória com uma só conexão (cada conexão teria a sua própria base).
pub async fn create_memory_pool() -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    tracing::info!("Executando migrações da base de dados...");
    // Executa os ficheiros SQL em ./migrations (embutidos na compilação)
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrações concluídas.");
    Ok(())
}

/// Cria o utilizador inicial se ainda não existir.
pub async fn ensure_seed_user(pool: &SqlitePool, seed: &SeedUser) -> AppResult<()> {
    if user_service::find_user_by_username(pool, &seed.username).await?.is_some() {
        tracing::debug!("Utilizador inicial '{}' já existe.", seed.username);
        return Ok(());
    }
    user_service::create_user(pool, &seed.name, &seed.username, &seed.password).await?;
    tracing::info!("Utilizador inicial '{}' criado.", seed.username);
    Ok(())
}

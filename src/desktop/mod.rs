// src/desktop/mod.rs
//! Interface de terminal. Cada execução corre um só comando sobre a mesma
//! base de dados do servidor web.
pub mod commands;
pub mod parser;

use crate::{
    config::AppConfig,
    db,
    error::{AppError, AppResult},
    services::auth_service,
};
use clap::Parser;
use parser::{Cli, Commands};
use sqlx::SqlitePool;

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    run_with(cli).await
}

pub async fn run_with(cli: Cli) -> AppResult<()> {
    let defaults = AppConfig::from_env()?;
    let database_url = cli.db.clone().unwrap_or(defaults.database_url);
    let upload_dir = cli.upload_dir.clone().unwrap_or(defaults.upload_dir);

    // Uma só ligação chega para um comando por processo
    let pool = db::create_db_pool(&database_url, 1).await?;

    match cli.command {
        Commands::User(cmd) => commands::handle_user(&pool, &upload_dir, cmd).await,
        Commands::Schedule(cmd) => {
            let user_id = login(&pool, &cli.user, &cli.password).await?;
            commands::handle_schedule(&pool, user_id, cmd).await
        }
        Commands::Task(cmd) => {
            let user_id = login(&pool, &cli.user, &cli.password).await?;
            commands::handle_task(&pool, user_id, cmd).await
        }
        Commands::File(cmd) => {
            let user_id = login(&pool, &cli.user, &cli.password).await?;
            commands::handle_file(&pool, &upload_dir, user_id, cmd).await
        }
        Commands::Points(cmd) => {
            let user_id = login(&pool, &cli.user, &cli.password).await?;
            commands::handle_points(&pool, user_id, cmd).await
        }
        Commands::Status { watch, interval } => {
            let user_id = login(&pool, &cli.user, &cli.password).await?;
            if watch {
                commands::watch_status(&pool, user_id, interval).await
            } else {
                commands::print_status(&pool, user_id).await
            }
        }
    }
}

async fn login(pool: &SqlitePool, user: &Option<String>, password: &Option<String>) -> AppResult<i64> {
    let (Some(user), Some(password)) = (user, password) else {
        return Err(AppError::Validation(
            "indique --user e --password (ou STUDY_USER e STUDY_PASSWORD)".into(),
        ));
    };
    let user = auth_service::authenticate(pool, user, password).await?;
    tracing::debug!("Desktop: utilizador {} autenticado", user.id);
    Ok(user.id)
}

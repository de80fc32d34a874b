#![allow(dead_code)]
use sqlx::SqlitePool;
use std::{env, fs, path::PathBuf};
use study_tracker::{db, services::user_service};

pub const PASSWORD: &str = "segredo123";

/// Base em memória com as migrações reais.
pub async fn memory_pool() -> SqlitePool {
    db::create_memory_pool().await.expect("pool em memória")
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> i64 {
    user_service::create_user(pool, username, username, PASSWORD)
        .await
        .expect("criar utilizador")
}

/// Pasta temporária única para o teste, vazia.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("study_tracker_{}_{}", name, std::process::id()));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("criar pasta temporária");
    path
}

/// Caminho para uma base SQLite temporária (o ficheiro é apagado se existir).
pub fn temp_db(name: &str) -> String {
    let mut path = env::temp_dir();
    path.push(format!("study_tracker_{}_{}.sqlite", name, std::process::id()));
    fs::remove_file(&path).ok();
    format!("sqlite://{}", path.to_string_lossy())
}

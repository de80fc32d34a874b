// src/config.rs
//! Configuração lida do ambiente (e de um `.env`, se existir).
use crate::error::{AppError, AppResult};
use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://study_tracker.db";

#[derive(Debug, Clone)]
pub struct SeedUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    /// Chave para assinar o cookie de sessão (mín. 64 bytes). Sem chave o
    /// cookie não é assinado.
    pub session_secret: Option<String>,
    pub session_ttl_secs: i64,
    pub seed_user: Option<SeedUser>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 20,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            upload_dir: PathBuf::from("Uploads"),
            session_secret: None,
            session_ttl_secs: 3600,
            seed_user: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok(); // Carrega .env
        let defaults = Self::default();

        let host = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", defaults.bind_addr.port())?;
        let bind_addr = SocketAddr::from_str(&format!("{}:{}", host, port))
            .map_err(|e| AppError::ConfigError(format!("BIND_ADDR/PORT inválidos: {}", e)))?;

        let seed_user = match (env::var("SEED_USERNAME"), env::var("SEED_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.trim().is_empty() => Some(SeedUser {
                name: env::var("SEED_NAME").unwrap_or_else(|_| username.clone()),
                username,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            bind_addr,
            upload_dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.upload_dir),
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            session_ttl_secs: parse_var("SESSION_TTL_SECS", defaults.session_ttl_secs)?,
            seed_user,
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::ConfigError(format!("{} inválido ('{}'): {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: Option<NaiveDateTime>,
}

// Versão sem hash, para listagens
#[derive(Debug, Clone, FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

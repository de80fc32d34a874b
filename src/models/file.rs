// src/models/file.rs
use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct FileRecord {
    pub id: i64,
    pub filename: String,
    pub filepath: String,
    pub upload_date: Option<NaiveDateTime>,
    pub user_id: i64,
}

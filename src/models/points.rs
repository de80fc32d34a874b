// src/models/points.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PointsLogEntry {
    pub id: i64,
    pub points: i64,
    pub log_date: Option<NaiveDateTime>,
    pub user_id: i64,
}

/// Estado dos pontos mostrado nas duas interfaces.
#[derive(Debug, Clone)]
pub struct PointsSummary {
    /// Soma das entradas desde o último reset.
    pub total: i64,
    /// Entrada mais recente (pode ser o próprio reset).
    pub latest: Option<PointsLogEntry>,
}

/// Mensagem semanal, só emitida ao sábado às 00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeeklyStatus {
    NoOuting,
    NormalOuting,
}

impl WeeklyStatus {
    pub fn message(self) -> &'static str {
        match self {
            WeeklyStatus::NoOuting => "Sem saída",
            WeeklyStatus::NormalOuting => "Saída normal",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PointsForm {
    pub points: String,
}

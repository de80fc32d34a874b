// src/models/schedule.rs
use crate::grid::Day;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Linha da tabela `schedule`. `start_time` está na forma canónica "HH:00".
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub day: Day,
    pub start_time: String,
    pub duration: i64,
    pub name: String,
    pub color: String,
    pub row_span: i64,
    pub col_span: i64,
    pub user_id: i64,
}

/// Entrada ainda por inserir (resultado de um plano da grelha).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleEntry {
    pub day: Day,
    pub start_time: String,
    pub duration: i64,
    pub name: String,
    pub color: String,
    pub row_span: i64,
    pub col_span: i64,
}

// --- Formulários da grelha (web) ---

#[derive(Debug, Deserialize)]
pub struct LectureForm {
    pub day: String,
    pub time: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct CellForm {
    pub day: String,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct MergeForm {
    pub day: String,
    pub time: String,
    pub rows: usize,
    pub cols: usize,
    pub name: String,
    pub color: String,
}

// src/models/task.rs
use crate::grid::Day;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: i64,
    pub day: String, // chave de `TaskDay`
    pub text: String,
    pub completed: bool,
    pub last_updated: Option<NaiveDateTime>,
    pub user_id: i64,
}

impl Task {
    pub fn tag(&self) -> TaskDay {
        TaskDay::parse(&self.day)
    }
}

/// Etiqueta de uma tarefa: um dia da semana ou "geral".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDay {
    Day(Day),
    General,
}

impl TaskDay {
    pub const GENERAL_KEY: &'static str = "general";

    /// Nunca falha: qualquer valor desconhecido passa a "geral".
    pub fn parse(raw: &str) -> TaskDay {
        let key = raw.trim().to_lowercase();
        if key.is_empty() || key == Self::GENERAL_KEY || key == "geral" {
            return TaskDay::General;
        }
        match key.parse::<Day>() {
            Ok(day) => TaskDay::Day(day),
            Err(_) => {
                tracing::debug!("Etiqueta de tarefa desconhecida '{}', a usar 'geral'", raw);
                TaskDay::General
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskDay::Day(day) => day.as_str(),
            TaskDay::General => Self::GENERAL_KEY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskDay::Day(day) => day.label(),
            TaskDay::General => "Geral",
        }
    }

    /// Todas as etiquetas, pela ordem da grelha e "geral" no fim.
    pub fn all() -> Vec<TaskDay> {
        Day::ALL
            .iter()
            .map(|d| TaskDay::Day(*d))
            .chain(std::iter::once(TaskDay::General))
            .collect()
    }
}

impl fmt::Display for TaskDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Corpo JSON de POST /update_task
#[derive(Debug, Deserialize)]
pub struct UpdateTaskPayload {
    pub id: i64,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateTaskResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewTaskForm {
    #[serde(default)]
    pub day: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTaskForm {
    pub text: String,
}

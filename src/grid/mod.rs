// src/grid/mod.rs
//! Grelha do horário semanal: dias (linhas) × horas (colunas).
//!
//! Este módulo não faz I/O. Recebe as entradas lidas da base de dados e
//! devolve o layout para desenhar ou o plano (apagar/inserir) de uma
//! fusão, separação ou edição de célula. O `schedule_service` aplica o plano
//! numa transação.

pub mod day;
pub mod layout;
pub mod time;

pub use day::{Day, DAY_COUNT};
pub use layout::{Block, Cell, EditPlan, ScheduleGrid, Selection};
pub use time::{normalize_time, TimeFormat, HOUR_COUNT};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Dia inválido: '{0}'")]
    InvalidDay(String),

    #[error("Seleção fora da grelha")]
    OutOfBounds,

    #[error("Não é possível fundir uma única célula")]
    SingleCell,

    #[error("A célula selecionada não está fundida")]
    NotMerged,

    #[error("O nome da aula não pode estar vazio")]
    EmptyName,

    #[error("Cor inválida: '{0}' (use #rrggbb)")]
    InvalidColor(String),
}

/// Aceita "#a1b2c3" ou "a1b2c3" e devolve sempre "#a1b2c3" em minúsculas.
pub fn normalize_color(raw: &str) -> Result<String, GridError> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("#{}", hex.to_ascii_lowercase()))
    } else {
        Err(GridError::InvalidColor(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_normalized() {
        assert_eq!(normalize_color("#FFAA00").unwrap(), "#ffaa00");
        assert_eq!(normalize_color(" 12ab9f ").unwrap(), "#12ab9f");
        assert!(normalize_color("red").is_err());
        assert!(normalize_color("#12345").is_err());
    }
}

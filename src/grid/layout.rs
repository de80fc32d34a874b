// src/grid/layout.rs
use super::{
    day::{Day, DAY_COUNT},
    normalize_color,
    time::{self, HOUR_COUNT},
    GridError,
};
use crate::models::schedule::{NewScheduleEntry, ScheduleEntry};
use std::ops::Range;

/// Retângulo de células: linha/coluna do canto superior esquerdo + extensão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub row: usize,
    pub column: usize,
    pub row_count: usize,
    pub column_count: usize,
}

impl Selection {
    pub fn new(row: usize, column: usize, row_count: usize, column_count: usize) -> Self {
        Self { row, column, row_count, column_count }
    }

    pub fn single(row: usize, column: usize) -> Self {
        Self::new(row, column, 1, 1)
    }

    /// Seleção a partir de um dia e de um token de hora. A hora passa pela
    /// normalização (com fallback), por isso só a extensão pode falhar.
    pub fn at(day: Day, time_token: &str, row_count: usize, column_count: usize) -> Result<Self, GridError> {
        let canonical = time::to_storage(time_token);
        let column = time::column_of(&canonical).unwrap_or(0);
        let selection = Self::new(day.index(), column, row_count, column_count);
        selection.check_bounds()?;
        Ok(selection)
    }

    pub fn is_single_cell(&self) -> bool {
        self.row_count == 1 && self.column_count == 1
    }

    pub fn check_bounds(&self) -> Result<(), GridError> {
        // Extensões vêm do cliente: soma com checked_add para não dar a volta
        let row_end = self.row.checked_add(self.row_count);
        let column_end = self.column.checked_add(self.column_count);
        let fits = self.row_count >= 1
            && self.column_count >= 1
            && row_end.is_some_and(|end| end <= DAY_COUNT)
            && column_end.is_some_and(|end| end <= HOUR_COUNT);
        if fits {
            Ok(())
        } else {
            Err(GridError::OutOfBounds)
        }
    }

    pub fn rows(&self) -> Range<usize> {
        self.row..self.row + self.row_count
    }

    pub fn columns(&self) -> Range<usize> {
        self.column..self.column + self.column_count
    }

    pub fn contains(&self, row: usize, column: usize) -> bool {
        self.rows().contains(&row) && self.columns().contains(&column)
    }

    pub fn intersects(&self, other: &Selection) -> bool {
        self.row < other.row + other.row_count
            && other.row < self.row + self.row_count
            && self.column < other.column + other.column_count
            && other.column < self.column + self.column_count
    }

    /// Área ocupada por uma entrada guardada, cortada aos limites da grelha.
    /// `None` se a hora de início não corresponder a nenhuma coluna.
    pub fn of_entry(entry: &ScheduleEntry) -> Option<Selection> {
        let row = entry.day.index();
        let column = time::column_of(&entry.start_time)?;
        let row_count = (entry.row_span.max(1) as usize).min(DAY_COUNT - row);
        let column_count = (entry.col_span.max(1) as usize).min(HOUR_COUNT - column);
        Some(Selection::new(row, column, row_count, column_count))
    }
}

/// Dados visíveis de uma célula âncora.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub entry_id: i64,
    pub name: String,
    pub color: String,
    pub row_span: usize,
    pub col_span: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Anchor(Block),
    /// Coberta por um bloco ancorado noutra célula; não tem dados próprios.
    Merged,
}

/// Layout completo (7 dias × 17 horas) de um utilizador.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    cells: Vec<Vec<Cell>>,
}

impl ScheduleGrid {
    pub fn from_entries(entries: &[ScheduleEntry]) -> Self {
        let mut cells = vec![vec![Cell::Empty; HOUR_COUNT]; DAY_COUNT];

        for entry in entries {
            let Some(area) = Selection::of_entry(entry) else {
                tracing::warn!(
                    "Entrada {} ignorada: hora '{}' não existe na grelha",
                    entry.id,
                    entry.start_time
                );
                continue;
            };

            if cells[area.row][area.column] != Cell::Empty {
                tracing::warn!(
                    "Entrada {} ignorada: a célula ({}, {}) já está ocupada",
                    entry.id,
                    entry.day,
                    entry.start_time
                );
                continue;
            }

            for row in area.rows() {
                for column in area.columns() {
                    if row == area.row && column == area.column {
                        cells[row][column] = Cell::Anchor(Block {
                            entry_id: entry.id,
                            name: entry.name.clone(),
                            color: entry.color.clone(),
                            row_span: area.row_count,
                            col_span: area.column_count,
                        });
                    } else if cells[row][column] == Cell::Empty {
                        cells[row][column] = Cell::Merged;
                    }
                }
            }
        }

        Self { cells }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(column))
    }
}

/// O que uma edição da grelha faz à tabela `schedule`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    pub delete_ids: Vec<i64>,
    pub insert: Option<NewScheduleEntry>,
}

/// Funde a seleção num único bloco ancorado no canto superior esquerdo.
/// Qualquer entrada cuja área toque na seleção é apagada.
pub fn plan_merge(
    entries: &[ScheduleEntry],
    selection: Selection,
    name: &str,
    color: &str,
) -> Result<EditPlan, GridError> {
    selection.check_bounds()?;
    if selection.is_single_cell() {
        return Err(GridError::SingleCell);
    }
    plan_block(entries, selection, name, color)
}

/// Escreve uma aula numa única célula (1×1).
pub fn plan_set_lecture(
    entries: &[ScheduleEntry],
    row: usize,
    column: usize,
    name: &str,
    color: &str,
) -> Result<EditPlan, GridError> {
    let selection = Selection::single(row, column);
    selection.check_bounds()?;
    plan_block(entries, selection, name, color)
}

/// Esvazia a célula: apaga a entrada que a ocupa (âncora ou bloco que a cobre).
pub fn plan_clear(entries: &[ScheduleEntry], row: usize, column: usize) -> Result<EditPlan, GridError> {
    let selection = Selection::single(row, column);
    selection.check_bounds()?;
    Ok(EditPlan {
        delete_ids: overlapping(entries, &selection),
        insert: None,
    })
}

/// Desfaz a fusão do bloco que cobre a célula indicada. A âncora volta a
/// 1×1 com o mesmo nome e cor; as restantes células ficam vazias.
pub fn plan_unmerge(entries: &[ScheduleEntry], row: usize, column: usize) -> Result<EditPlan, GridError> {
    Selection::single(row, column).check_bounds()?;

    let entry = entries
        .iter()
        .find(|e| Selection::of_entry(e).is_some_and(|area| area.contains(row, column)))
        .ok_or(GridError::NotMerged)?;

    if entry.row_span <= 1 && entry.col_span <= 1 {
        return Err(GridError::NotMerged);
    }

    let insert = if entry.name.trim().is_empty() {
        None
    } else {
        Some(NewScheduleEntry {
            day: entry.day,
            start_time: time::to_storage(&entry.start_time),
            duration: 1,
            name: entry.name.clone(),
            color: entry.color.clone(),
            row_span: 1,
            col_span: 1,
        })
    };

    Ok(EditPlan {
        delete_ids: vec![entry.id],
        insert,
    })
}

fn plan_block(
    entries: &[ScheduleEntry],
    selection: Selection,
    name: &str,
    color: &str,
) -> Result<EditPlan, GridError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GridError::EmptyName);
    }
    let color = normalize_color(color)?;

    let day = Day::from_index(selection.row).ok_or(GridError::OutOfBounds)?;
    let start_time = time::storage_time_of_column(selection.column).ok_or(GridError::OutOfBounds)?;

    Ok(EditPlan {
        delete_ids: overlapping(entries, &selection),
        insert: Some(NewScheduleEntry {
            day,
            start_time,
            duration: selection.column_count as i64,
            name: name.to_string(),
            color,
            row_span: selection.row_count as i64,
            col_span: selection.column_count as i64,
        }),
    })
}

fn overlapping(entries: &[ScheduleEntry], selection: &Selection) -> Vec<i64> {
    entries
        .iter()
        .filter(|e| Selection::of_entry(e).is_some_and(|area| area.intersects(selection)))
        .map(|e| e.id)
        .collect()
}

// src/templates.rs
use crate::{
    grid::{time, Cell, Day, ScheduleGrid},
    models::{file::FileRecord, points::PointsSummary, task::Task, task::TaskDay},
};
use askama::Template; // Trait necessário para Askama
use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    // Campo opcional para passar uma mensagem de erro para o template
    pub error: Option<String>,
}

/// Opção de um `<select>` (valor guardado + nome mostrado).
#[derive(Clone, Debug)]
pub struct DayOption {
    pub key: &'static str,
    pub label: &'static str,
}

/// Uma célula da grelha como o template a desenha. As células `merged`
/// não geram `<td>`: o rowspan/colspan da âncora ocupa o lugar delas.
#[derive(Clone, Debug)]
pub struct CellView {
    pub anchor: bool,
    pub merged: bool,
    pub name: String,
    pub color: String,
    pub row_span: usize,
    pub col_span: usize,
    pub time: String,
}

#[derive(Clone, Debug)]
pub struct GridRowView {
    pub day_key: &'static str,
    pub day_label: &'static str,
    pub cells: Vec<CellView>,
}

impl GridRowView {
    pub fn from_grid(grid: &ScheduleGrid) -> Vec<GridRowView> {
        let labels = time::hour_labels();
        Day::ALL
            .iter()
            .zip(grid.rows())
            .map(|(day, row)| GridRowView {
                day_key: day.as_str(),
                day_label: day.label(),
                cells: row
                    .iter()
                    .zip(labels.iter())
                    .map(|(cell, label)| match cell {
                        Cell::Anchor(block) => CellView {
                            anchor: true,
                            merged: false,
                            name: block.name.clone(),
                            color: block.color.clone(),
                            row_span: block.row_span,
                            col_span: block.col_span,
                            time: label.clone(),
                        },
                        Cell::Merged => CellView::placeholder(label, true),
                        Cell::Empty => CellView::placeholder(label, false),
                    })
                    .collect(),
            })
            .collect()
    }
}

impl CellView {
    fn placeholder(time: &str, merged: bool) -> Self {
        Self {
            anchor: false,
            merged,
            name: String::new(),
            color: String::new(),
            row_span: 1,
            col_span: 1,
            time: time.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TaskView {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub day_label: &'static str,
    pub last_updated: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            day_label: task.tag().label(),
            last_updated: format_timestamp(task.last_updated),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub user_name: String,
    pub date_str: String,
    pub hours: Vec<String>,
    pub rows: Vec<GridRowView>,
    pub days: Vec<DayOption>,
    pub tasks: Vec<TaskView>,
    pub task_days: Vec<DayOption>,
    pub points_total: i64,
    pub points_latest: Option<String>,
    pub weekly_message: Option<&'static str>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl IndexPage {
    pub fn day_options() -> Vec<DayOption> {
        Day::ALL
            .iter()
            .map(|d| DayOption { key: d.as_str(), label: d.label() })
            .collect()
    }

    pub fn task_day_options() -> Vec<DayOption> {
        TaskDay::all()
            .into_iter()
            .map(|t| DayOption { key: t.as_str(), label: t.label() })
            .collect()
    }

    /// "Último registo: 12 pontos (2025-11-01 10:00)"
    pub fn describe_latest(summary: &PointsSummary) -> Option<String> {
        summary.latest.as_ref().map(|entry| {
            format!("{} pontos ({})", entry.points, format_timestamp(entry.log_date))
        })
    }
}

#[derive(Clone, Debug)]
pub struct FileView {
    pub filename: String,
    pub upload_date: String,
    pub download_url: String,
}

impl From<&FileRecord> for FileView {
    fn from(file: &FileRecord) -> Self {
        Self {
            filename: file.filename.clone(),
            upload_date: format_timestamp(file.upload_date),
            download_url: format!("/Uploads/{}", urlencoding::encode(&file.filename)),
        }
    }
}

#[derive(Template)]
#[template(path = "files.html")]
pub struct FilesPage {
    pub files: Vec<FileView>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// "Sábado - 01/11/2025"
pub fn format_date_header(today: NaiveDate) -> String {
    let day = Day::from_weekday(today.weekday());
    format!("{} - {}", day.label(), today.format("%d/%m/%Y"))
}

pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::ScheduleEntry;

    #[test]
    fn header_uses_the_grid_day_names() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(format_date_header(date), "Sábado - 01/11/2025");
    }

    #[test]
    fn grid_rows_carry_spans_and_placeholders() {
        let entries = vec![ScheduleEntry {
            id: 1,
            day: Day::Saturday,
            start_time: "07:00".into(),
            duration: 2,
            name: "Biologia".into(),
            color: "#abcdef".into(),
            row_span: 1,
            col_span: 2,
            user_id: 1,
        }];
        let rows = GridRowView::from_grid(&ScheduleGrid::from_entries(&entries));

        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].day_key, "saturday");
        let first = &rows[0].cells[0];
        assert!(first.anchor);
        assert_eq!((first.col_span, first.time.as_str()), (2, "7:00"));
        assert!(rows[0].cells[1].merged);
        assert!(!rows[0].cells[2].merged && !rows[0].cells[2].anchor);
    }
}

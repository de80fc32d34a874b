// src/desktop/commands.rs
use super::parser::{FileCommand, PointsCommand, ScheduleCommand, TaskCommand, UserCommand};
use crate::{
    error::{AppError, AppResult},
    grid::{time, Cell, Day, Selection},
    services::{file_service, points_service, schedule_service, task_service, user_service},
    templates::{format_date_header, format_timestamp},
};
use chrono::Local;
use sqlx::SqlitePool;
use std::path::Path;

/// Largura de cada coluna na grelha impressa.
const CELL_WIDTH: usize = 8;

pub async fn handle_user(pool: &SqlitePool, upload_dir: &Path, cmd: UserCommand) -> AppResult<()> {
    match cmd {
        UserCommand::Add { username, name, new_password } => {
            let name = name.unwrap_or_else(|| username.clone());
            let id = user_service::create_user(pool, &name, &username, &new_password).await?;
            println!("✅ Utilizador '{}' criado (id {}).", username.trim(), id);
        }
        UserCommand::List => {
            let users = user_service::find_all_users(pool).await?;
            if users.is_empty() {
                println!("Nenhum utilizador registado.");
            }
            for user in users {
                println!("{:>4}  {:<20} {}", user.id, user.username, user.name);
            }
        }
        UserCommand::Delete { username } => {
            let user = user_service::find_user_by_username(pool, &username)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("utilizador '{}'", username)))?;
            // Os registos caem em cascata, mas os ficheiros em disco não
            file_service::clear_files(pool, upload_dir, user.id).await?;
            user_service::delete_user(pool, user.id).await?;
            println!("🗑️ Utilizador '{}' apagado.", username);
        }
        UserCommand::Passwd { username, new_password } => {
            let user = user_service::find_user_by_username(pool, &username)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("utilizador '{}'", username)))?;
            user_service::update_user_password(pool, user.id, &new_password).await?;
            println!("🔑 Password de '{}' alterada.", username);
        }
    }
    Ok(())
}

pub async fn handle_schedule(pool: &SqlitePool, user_id: i64, cmd: ScheduleCommand) -> AppResult<()> {
    match cmd {
        ScheduleCommand::Show => print_grid(pool, user_id).await?,
        ScheduleCommand::Set { cell, name, color } => {
            let day: Day = cell.day.parse()?;
            schedule_service::set_lecture(pool, user_id, day, &cell.time, &name, &color).await?;
            println!("✅ Aula '{}' em {} {}.", name.trim(), day, time::to_display(&cell.time));
        }
        ScheduleCommand::Clear { cell } => {
            let day: Day = cell.day.parse()?;
            schedule_service::clear_cell(pool, user_id, day, &cell.time).await?;
            println!("✅ Célula {} {} limpa.", day, time::to_display(&cell.time));
        }
        ScheduleCommand::Merge { cell, rows, cols, name, color } => {
            let day: Day = cell.day.parse()?;
            let selection = Selection::at(day, &cell.time, rows, cols)?;
            schedule_service::merge_cells(pool, user_id, selection, &name, &color).await?;
            println!("✅ Células fundidas ({}×{}).", rows, cols);
        }
        ScheduleCommand::Unmerge { cell } => {
            let day: Day = cell.day.parse()?;
            schedule_service::unmerge_cell(pool, user_id, day, &cell.time).await?;
            println!("✅ Fusão desfeita em {} {}.", day, time::to_display(&cell.time));
        }
    }
    Ok(())
}

async fn print_grid(pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    let grid = schedule_service::load_grid(pool, user_id).await?;

    print!("{:<10}", "");
    for label in time::hour_labels() {
        print!("{:<width$}", label, width = CELL_WIDTH);
    }
    println!();

    for (day, row) in Day::ALL.iter().zip(grid.rows()) {
        print!("{:<10}", day.label());
        for cell in row {
            let text = match cell {
                Cell::Empty => ".".to_string(),
                Cell::Merged => "~".to_string(),
                Cell::Anchor(block) => fit(&block.name, CELL_WIDTH - 1),
            };
            print!("{:<width$}", text, width = CELL_WIDTH);
        }
        println!();
    }
    println!("(~ = coberta por uma célula fundida)");
    Ok(())
}

fn fit(text: &str, width: usize) -> String {
    let text = if text.trim().is_empty() { "#" } else { text.trim() };
    text.chars().take(width).collect()
}

pub async fn handle_task(pool: &SqlitePool, user_id: i64, cmd: TaskCommand) -> AppResult<()> {
    match cmd {
        TaskCommand::List => {
            let tasks = task_service::list_tasks(pool, user_id).await?;
            if tasks.is_empty() {
                println!("Sem tarefas.");
            }
            for task in tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("[{}] {:>4}  {:<8} {}", mark, task.id, task.tag().label(), task.text);
            }
        }
        TaskCommand::Add { text, day } => {
            let id = task_service::add_task(pool, user_id, &text, &day).await?;
            println!("✅ Tarefa {} adicionada.", id);
        }
        TaskCommand::Edit { id, text } => {
            task_service::update_text(pool, user_id, id, &text).await?;
            println!("✅ Tarefa {} atualizada.", id);
        }
        TaskCommand::Toggle { id } => {
            let completed = task_service::toggle_task(pool, user_id, id).await?;
            let state = if completed { "concluída" } else { "por fazer" };
            println!("✅ Tarefa {} marcada como {}.", id, state);
        }
        TaskCommand::Delete { id } => {
            task_service::delete_task(pool, user_id, id).await?;
            println!("🗑️ Tarefa {} apagada.", id);
        }
        TaskCommand::ClearCompleted => {
            let removed = task_service::clear_completed(pool, user_id).await?;
            println!("🗑️ {} tarefas concluídas removidas.", removed);
        }
    }
    Ok(())
}

pub async fn handle_file(pool: &SqlitePool, upload_dir: &Path, user_id: i64, cmd: FileCommand) -> AppResult<()> {
    match cmd {
        FileCommand::Upload { path } => {
            let record = file_service::import_file(pool, upload_dir, user_id, &path).await?;
            println!("✅ Ficheiro '{}' guardado.", record.filename);
        }
        FileCommand::List => {
            let files = file_service::list_files(pool, user_id).await?;
            if files.is_empty() {
                println!("Sem ficheiros.");
            }
            for file in files {
                println!("{}  {}", format_timestamp(file.upload_date), file.filename);
            }
        }
        FileCommand::Clear => {
            let removed = file_service::clear_files(pool, upload_dir, user_id).await?;
            println!("🗑️ {} ficheiros apagados.", removed);
        }
    }
    Ok(())
}

pub async fn handle_points(pool: &SqlitePool, user_id: i64, cmd: PointsCommand) -> AppResult<()> {
    match cmd {
        PointsCommand::Add { points } => {
            let points = points_service::parse_points(&points)?;
            points_service::add_points(pool, user_id, points).await?;
            println!("✅ {} pontos adicionados.", points);
        }
        PointsCommand::Reset => {
            points_service::reset_points(pool, user_id).await?;
            println!("✅ Pontos reiniciados a zero.");
        }
        PointsCommand::Show { limit } => {
            let summary = points_service::summary(pool, user_id).await?;
            println!("Total: {}", summary.total);
            for entry in points_service::history(pool, user_id, limit).await? {
                let label = if entry.points == 0 { "reset".to_string() } else { format!("+{}", entry.points) };
                println!("  {}  {}", format_timestamp(entry.log_date), label);
            }
        }
    }
    Ok(())
}

/// Uma leitura do estado: data, total e, ao sábado às 00:00, a mensagem semanal.
pub async fn print_status(pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    let summary = points_service::summary(pool, user_id).await?;
    let now = Local::now().naive_local();

    println!("{}", format_date_header(now.date()));
    println!("Total de pontos: {}", summary.total);
    if let Some(latest) = &summary.latest {
        println!("Última entrada: {} ({})", latest.points, format_timestamp(latest.log_date));
    }
    if let Some(status) = points_service::weekly_status(now, summary.total) {
        println!("📣 {}", status.message());
    }
    Ok(())
}

/// Repete `print_status` a cada `interval_secs` até o processo terminar.
pub async fn watch_status(pool: &SqlitePool, user_id: i64, interval_secs: u64) -> AppResult<()> {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs.max(1)));
    loop {
        interval.tick().await;
        if let Err(e) = print_status(pool, user_id).await {
            // Falhas pontuais não param o ciclo
            tracing::error!("Falha ao ler o estado dos pontos: {}", e);
        }
    }
}

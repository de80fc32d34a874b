// src/services/task_service.rs
use crate::{
    error::{AppError, AppResult},
    models::task::{Task, TaskDay},
};
use sqlx::SqlitePool;

pub async fn list_tasks(db_pool: &SqlitePool, user_id: i64) -> AppResult<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, day, text, completed, last_updated, user_id FROM tasks WHERE user_id = ?1 ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await?;
    Ok(tasks)
}

pub async fn find_task(db_pool: &SqlitePool, user_id: i64, task_id: i64) -> AppResult<Option<Task>> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, day, text, completed, last_updated, user_id FROM tasks WHERE id = ?1 AND user_id = ?2",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(task)
}

/// Cria uma tarefa e devolve o ID. Etiqueta desconhecida -> "geral".
pub async fn add_task(db_pool: &SqlitePool, user_id: i64, text: &str, day: &str) -> AppResult<i64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("O texto da tarefa não pode estar vazio".into()));
    }
    let tag = TaskDay::parse(day);

    let id = sqlx::query("INSERT INTO tasks (day, text, user_id) VALUES (?1, ?2, ?3)")
        .bind(tag.as_str())
        .bind(text)
        .bind(user_id)
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    tracing::info!("User {}: tarefa {} criada ({})", user_id, id, tag.as_str());
    Ok(id)
}

pub async fn update_text(db_pool: &SqlitePool, user_id: i64, task_id: i64, text: &str) -> AppResult<()> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("O texto da tarefa não pode estar vazio".into()));
    }
    let rows_affected = sqlx::query(
        "UPDATE tasks SET text = ?1, last_updated = CURRENT_TIMESTAMP WHERE id = ?2 AND user_id = ?3",
    )
    .bind(text)
    .bind(task_id)
    .bind(user_id)
    .execute(db_pool)
    .await?
    .rows_affected();
    ensure_found(rows_affected, task_id)
}

pub async fn set_completed(db_pool: &SqlitePool, user_id: i64, task_id: i64, completed: bool) -> AppResult<()> {
    let rows_affected = sqlx::query(
        "UPDATE tasks SET completed = ?1, last_updated = CURRENT_TIMESTAMP WHERE id = ?2 AND user_id = ?3",
    )
    .bind(completed)
    .bind(task_id)
    .bind(user_id)
    .execute(db_pool)
    .await?
    .rows_affected();
    tracing::debug!("User {}: tarefa {} -> concluída = {}", user_id, task_id, completed);
    ensure_found(rows_affected, task_id)
}

/// Inverte o estado e devolve o novo valor.
pub async fn toggle_task(db_pool: &SqlitePool, user_id: i64, task_id: i64) -> AppResult<bool> {
    let task = find_task(db_pool, user_id, task_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("tarefa {}", task_id)))?;
    let completed = !task.completed;
    set_completed(db_pool, user_id, task_id, completed).await?;
    Ok(completed)
}

pub async fn delete_task(db_pool: &SqlitePool, user_id: i64, task_id: i64) -> AppResult<()> {
    let rows_affected = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND user_id = ?2")
        .bind(task_id)
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    ensure_found(rows_affected, task_id)
}

/// Apaga as tarefas concluídas; devolve quantas foram apagadas.
pub async fn clear_completed(db_pool: &SqlitePool, user_id: i64) -> AppResult<u64> {
    let removed = sqlx::query("DELETE FROM tasks WHERE user_id = ?1 AND completed = 1")
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("User {}: {} tarefas concluídas removidas", user_id, removed);
    Ok(removed)
}

fn ensure_found(rows_affected: u64, task_id: i64) -> AppResult<()> {
    if rows_affected == 0 {
        tracing::warn!("Tarefa {} não encontrada", task_id);
        Err(AppError::NotFound(format!("tarefa {}", task_id)))
    } else {
        Ok(())
    }
}

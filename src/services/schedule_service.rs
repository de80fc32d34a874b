// src/services/schedule_service.rs
use crate::{
    error::AppResult,
    grid::{
        layout::{self, EditPlan},
        time, Day, ScheduleGrid, Selection,
    },
    models::schedule::ScheduleEntry,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

const SELECT_ENTRIES: &str = r#"
    SELECT id, day, start_time, duration, name, color, row_span, col_span, user_id
    FROM schedule
    WHERE user_id = ?1
    ORDER BY id ASC
"#;

pub async fn list_entries(db_pool: &SqlitePool, user_id: i64) -> AppResult<Vec<ScheduleEntry>> {
    let entries = sqlx::query_as::<_, ScheduleEntry>(SELECT_ENTRIES)
        .bind(user_id)
        .fetch_all(db_pool)
        .await?;
    tracing::debug!("{} entradas de horário para user {}", entries.len(), user_id);
    Ok(entries)
}

/// Layout da grelha pronto a desenhar.
pub async fn load_grid(db_pool: &SqlitePool, user_id: i64) -> AppResult<ScheduleGrid> {
    let entries = list_entries(db_pool, user_id).await?;
    Ok(ScheduleGrid::from_entries(&entries))
}

/// Escreve uma aula 1×1 na célula (dia, hora).
pub async fn set_lecture(
    db_pool: &SqlitePool,
    user_id: i64,
    day: Day,
    time_token: &str,
    name: &str,
    color: &str,
) -> AppResult<()> {
    let selection = Selection::at(day, time_token, 1, 1)?;
    tracing::info!("User {}: aula '{}' em {} {}", user_id, name.trim(), day, time::to_display(time_token));

    let mut tx = db_pool.begin().await?;
    let entries = entries_in_tx(&mut tx, user_id).await?;
    let plan = layout::plan_set_lecture(&entries, selection.row, selection.column, name, color)?;
    apply_plan(&mut tx, user_id, plan).await?;
    tx.commit().await?;
    Ok(())
}

/// Esvazia a célula (dia, hora). Se a célula estiver coberta por um bloco
/// fundido, o bloco inteiro é apagado.
pub async fn clear_cell(db_pool: &SqlitePool, user_id: i64, day: Day, time_token: &str) -> AppResult<()> {
    let selection = Selection::at(day, time_token, 1, 1)?;

    let mut tx = db_pool.begin().await?;
    let entries = entries_in_tx(&mut tx, user_id).await?;
    let plan = layout::plan_clear(&entries, selection.row, selection.column)?;
    apply_plan(&mut tx, user_id, plan).await?;
    tx.commit().await?;
    Ok(())
}

/// Funde a seleção num bloco. Tudo o que estava debaixo da seleção é apagado.
pub async fn merge_cells(
    db_pool: &SqlitePool,
    user_id: i64,
    selection: Selection,
    name: &str,
    color: &str,
) -> AppResult<()> {
    tracing::info!(
        "User {}: fundir {}x{} a partir de ({}, {})",
        user_id,
        selection.row_count,
        selection.column_count,
        selection.row,
        selection.column
    );

    let mut tx = db_pool.begin().await?;
    let entries = entries_in_tx(&mut tx, user_id).await?;
    let plan = layout::plan_merge(&entries, selection, name, color)?;
    apply_plan(&mut tx, user_id, plan).await?;
    tx.commit().await?;

    tracing::info!("✅ Células fundidas para user {}", user_id);
    Ok(())
}

/// Desfaz a fusão do bloco que cobre (dia, hora).
pub async fn unmerge_cell(db_pool: &SqlitePool, user_id: i64, day: Day, time_token: &str) -> AppResult<()> {
    let selection = Selection::at(day, time_token, 1, 1)?;

    let mut tx = db_pool.begin().await?;
    let entries = entries_in_tx(&mut tx, user_id).await?;
    let plan = layout::plan_unmerge(&entries, selection.row, selection.column)?;
    apply_plan(&mut tx, user_id, plan).await?;
    tx.commit().await?;

    tracing::info!("✅ Fusão desfeita para user {} em {} {}", user_id, day, time::to_display(time_token));
    Ok(())
}

async fn entries_in_tx(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> AppResult<Vec<ScheduleEntry>> {
    let entries = sqlx::query_as::<_, ScheduleEntry>(SELECT_ENTRIES)
        .bind(user_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(entries)
}

async fn apply_plan(tx: &mut Transaction<'_, Sqlite>, user_id: i64, plan: EditPlan) -> AppResult<()> {
    for id in &plan.delete_ids {
        sqlx::query("DELETE FROM schedule WHERE id = ?1 AND user_id = ?2")
            .bind(*id)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
    }
    tracing::debug!("Apagadas {} entradas de horário", plan.delete_ids.len());

    if let Some(new) = plan.insert {
        sqlx::query(
            r#"
            INSERT INTO schedule (day, start_time, duration, name, color, row_span, col_span, user_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(new.day)
        .bind(&new.start_time)
        .bind(new.duration)
        .bind(&new.name)
        .bind(&new.color)
        .bind(new.row_span)
        .bind(new.col_span)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

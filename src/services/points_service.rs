// src/services/points_service.rs
use crate::{
    error::{AppError, AppResult},
    models::points::{PointsLogEntry, PointsSummary, WeeklyStatus},
};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use sqlx::SqlitePool;

/// Meta semanal: abaixo disto não há saída.
pub const WEEKLY_THRESHOLD: i64 = 30;

/// Converte o texto do formulário num número de pontos positivo.
pub fn parse_points(raw: &str) -> AppResult<i64> {
    let points: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Validation("Indique apenas um número inteiro".into()))?;
    if points <= 0 {
        return Err(AppError::Validation("Indique um número positivo".into()));
    }
    Ok(points)
}

pub async fn add_points(db_pool: &SqlitePool, user_id: i64, points: i64) -> AppResult<()> {
    if points <= 0 {
        return Err(AppError::Validation("Indique um número positivo".into()));
    }
    sqlx::query("INSERT INTO points_log (points, user_id) VALUES (?1, ?2)")
        .bind(points)
        .bind(user_id)
        .execute(db_pool)
        .await?;
    tracing::info!("User {}: +{} pontos", user_id, points);
    Ok(())
}

/// O reset fica no histórico como uma entrada de 0 pontos; o total conta a
/// partir dela.
pub async fn reset_points(db_pool: &SqlitePool, user_id: i64) -> AppResult<()> {
    sqlx::query("INSERT INTO points_log (points, user_id) VALUES (0, ?1)")
        .bind(user_id)
        .execute(db_pool)
        .await?;
    tracing::info!("User {}: pontos reiniciados", user_id);
    Ok(())
}

pub async fn summary(db_pool: &SqlitePool, user_id: i64) -> AppResult<PointsSummary> {
    let total: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT SUM(points) FROM points_log
        WHERE user_id = ?1
          AND id > COALESCE((SELECT MAX(id) FROM points_log WHERE user_id = ?1 AND points = 0), 0)
        "#,
    )
    .bind(user_id)
    .fetch_one(db_pool)
    .await?;

    let latest = sqlx::query_as::<_, PointsLogEntry>(
        "SELECT id, points, log_date, user_id FROM points_log WHERE user_id = ?1 ORDER BY id DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;

    Ok(PointsSummary {
        total: total.unwrap_or(0),
        latest,
    })
}

pub async fn history(db_pool: &SqlitePool, user_id: i64, limit: i64) -> AppResult<Vec<PointsLogEntry>> {
    let entries = sqlx::query_as::<_, PointsLogEntry>(
        "SELECT id, points, log_date, user_id FROM points_log WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db_pool)
    .await?;
    Ok(entries)
}

/// Só no instante semanal (sábado, 00:00) há mensagem; fora dele `None`.
pub fn weekly_status(now: NaiveDateTime, total: i64) -> Option<WeeklyStatus> {
    if now.weekday() != Weekday::Sat || now.hour() != 0 || now.minute() != 0 {
        return None;
    }
    if total < WEEKLY_THRESHOLD {
        Some(WeeklyStatus::NoOuting)
    } else {
        Some(WeeklyStatus::NormalOuting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 30))
            .unwrap()
    }

    #[test]
    fn status_only_on_saturday_midnight() {
        // 2025-11-01 é sábado
        assert_eq!(weekly_status(at(2025, 11, 1, 0, 0), 10), Some(WeeklyStatus::NoOuting));
        assert_eq!(weekly_status(at(2025, 11, 1, 0, 0), 30), Some(WeeklyStatus::NormalOuting));
        assert_eq!(weekly_status(at(2025, 11, 1, 0, 1), 10), None);
        assert_eq!(weekly_status(at(2025, 11, 1, 12, 0), 10), None);
        assert_eq!(weekly_status(at(2025, 11, 2, 0, 0), 10), None);
    }

    #[test]
    fn points_must_be_positive_integers() {
        assert_eq!(parse_points(" 12 ").unwrap(), 12);
        assert!(parse_points("0").is_err());
        assert!(parse_points("-3").is_err());
        assert!(parse_points("dez").is_err());
    }
}

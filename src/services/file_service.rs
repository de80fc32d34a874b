// src/services/file_service.rs
//! Ficheiros de referência (PDF) enviados pelo utilizador.
//!
//! Em disco ficam em `<upload_dir>/<user_id>/<nome>`; a coluna `filepath`
//! guarda o caminho relativo a `upload_dir`.
use crate::{
    error::{AppError, AppResult},
    models::file::FileRecord,
};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Fica só com o nome base e recusa nomes vazios, escondidos ou com
/// extensão não permitida.
pub fn sanitize_filename(raw: &str) -> AppResult<String> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if base.is_empty() || base.starts_with('.') {
        return Err(AppError::UploadError(format!("Nome de ficheiro inválido: '{}'", raw)));
    }

    let extension = Path::new(&base)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::UploadError(format!(
            "Só são aceites ficheiros {:?}: '{}'",
            ALLOWED_EXTENSIONS, base
        )));
    }
    Ok(base)
}

pub async fn list_files(db_pool: &SqlitePool, user_id: i64) -> AppResult<Vec<FileRecord>> {
    let files = sqlx::query_as::<_, FileRecord>(
        "SELECT id, filename, filepath, upload_date, user_id FROM files WHERE user_id = ?1 ORDER BY upload_date DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await?;
    Ok(files)
}

pub async fn find_file(db_pool: &SqlitePool, user_id: i64, filename: &str) -> AppResult<Option<FileRecord>> {
    let file = sqlx::query_as::<_, FileRecord>(
        "SELECT id, filename, filepath, upload_date, user_id FROM files WHERE user_id = ?1 AND filename = ?2 ORDER BY id DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(filename)
    .fetch_optional(db_pool)
    .await?;
    Ok(file)
}

/// Grava o conteúdo e regista o ficheiro. Um nome repetido substitui o anterior.
pub async fn store_file(
    db_pool: &SqlitePool,
    upload_dir: &Path,
    user_id: i64,
    raw_filename: &str,
    contents: &[u8],
) -> AppResult<FileRecord> {
    let filename = sanitize_filename(raw_filename)?;
    if contents.is_empty() {
        return Err(AppError::UploadError(format!("O ficheiro '{}' está vazio", filename)));
    }

    let relative = format!("{}/{}", user_id, filename);
    let target = upload_dir.join(&relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, contents).await?;
    tracing::info!("User {}: ficheiro gravado em {}", user_id, target.display());

    let mut tx = db_pool.begin().await?;
    sqlx::query("DELETE FROM files WHERE user_id = ?1 AND filename = ?2")
        .bind(user_id)
        .bind(&filename)
        .execute(&mut *tx)
        .await?;
    let id = sqlx::query("INSERT INTO files (filename, filepath, user_id) VALUES (?1, ?2, ?3)")
        .bind(&filename)
        .bind(&relative)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();
    let record = sqlx::query_as::<_, FileRecord>(
        "SELECT id, filename, filepath, upload_date, user_id FROM files WHERE id = ?1",
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(record)
}

/// Copia um ficheiro local para a área de uploads (interface desktop).
pub async fn import_file(db_pool: &SqlitePool, upload_dir: &Path, user_id: i64, source: &Path) -> AppResult<FileRecord> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::UploadError(format!("Caminho inválido: {}", source.display())))?;
    let contents = tokio::fs::read(source).await?;
    store_file(db_pool, upload_dir, user_id, name, &contents).await
}

/// Caminho absoluto de um ficheiro do utilizador, se existir registo.
pub async fn resolve_download(
    db_pool: &SqlitePool,
    upload_dir: &Path,
    user_id: i64,
    filename: &str,
) -> AppResult<(FileRecord, PathBuf)> {
    let record = find_file(db_pool, user_id, filename)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("ficheiro '{}'", filename)))?;
    let path = upload_dir.join(&record.filepath);
    if !tokio::fs::try_exists(&path).await? {
        tracing::warn!("Registo {} aponta para ficheiro inexistente: {}", record.id, path.display());
        return Err(AppError::NotFound(format!("ficheiro '{}'", filename)));
    }
    Ok((record, path))
}

/// Apaga todos os ficheiros do utilizador (disco + registos). Devolve
/// quantos registos foram removidos.
pub async fn clear_files(db_pool: &SqlitePool, upload_dir: &Path, user_id: i64) -> AppResult<u64> {
    for record in list_files(db_pool, user_id).await? {
        let path = upload_dir.join(&record.filepath);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!("Removido {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Ficheiro já não existia: {}", path.display())
            }
            Err(e) => return Err(e.into()),
        }
    }

    let removed = sqlx::query("DELETE FROM files WHERE user_id = ?1")
        .bind(user_id)
        .execute(db_pool)
        .await?
        .rows_affected();
    tracing::info!("User {}: {} ficheiros removidos", user_id, removed);
    Ok(removed)
}

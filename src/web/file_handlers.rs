// src/web/file_handlers.rs
use crate::{
    error::{AppError, AppResult},
    services::file_service,
    state::AppState,
    templates::{FileView, FilesPage},
    web::{
        feedback::{redirect_with, FeedbackParams},
        mw_auth::UserId,
    },
};
use askama::Template;
use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};

/// Limite do corpo no envio de ficheiros.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

// GET /files
pub async fn list_files_page(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<Html<String>> {
    let files = file_service::list_files(&state.db_pool, user_id).await?;
    let template = FilesPage {
        files: files.iter().map(FileView::from).collect(),
        success_message: params.success,
        error_message: params.error,
    };
    Ok(Html(template.render()?))
}

// POST /files/upload (multipart, campo "file")
pub async fn handle_upload(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    redirect_with("/files", receive_upload(&state, user_id, multipart).await)
}

// POST /files/clear
pub async fn handle_clear_files(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
) -> AppResult<Redirect> {
    let outcome = file_service::clear_files(&state.db_pool, &state.config.upload_dir, user_id)
        .await
        .map(|n| format!("{} ficheiros apagados.", n));
    redirect_with("/files", outcome)
}

// GET /Uploads/{filename}
pub async fn download_file(
    State(state): State<AppState>,
    Extension(UserId(user_id)): Extension<UserId>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let (record, path) =
        file_service::resolve_download(&state.db_pool, &state.config.upload_dir, user_id, &filename).await?;
    let contents = tokio::fs::read(&path).await?;
    tracing::debug!("Download de '{}' por user {}", record.filename, user_id);

    let disposition = format!(
        "attachment; filename=\"{}\"",
        record.filename.replace(['"', '\\'], "_")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    )
        .into_response())
}

async fn receive_upload(state: &AppState, user_id: i64, mut multipart: Multipart) -> AppResult<String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::UploadError(format!("Pedido inválido: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::UploadError("Ficheiro sem nome".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::UploadError(format!("Falha ao ler o ficheiro: {}", e)))?;

        let record =
            file_service::store_file(&state.db_pool, &state.config.upload_dir, user_id, &filename, &data).await?;
        return Ok(format!("Ficheiro {} enviado com sucesso.", record.filename));
    }
    Err(AppError::UploadError("Nenhum ficheiro recebido".into()))
}

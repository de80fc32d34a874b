mod common;

use study_tracker::{
    error::AppError,
    models::task::TaskDay,
    services::{file_service, points_service, task_service},
};

#[tokio::test]
async fn task_completion_survives_a_reload() {
    let pool = common::memory_pool().await;
    let user = common::create_user(&pool, "ana").await;

    let id = task_service::add_task(&pool, user, "  Resolver exercícios ", "Quarta").await.unwrap();
    assert!(task_service::toggle_task(&pool, user, id).await.unwrap());

    let tasks = task_service::list_tasks(&pool, user).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].text, "Resolver exercícios");
    assert_eq!(tasks[0].day, "wednesday");

    task_service::set_completed(&pool, user, id, false).await.unwrap();
    let task = task_service::find_task(&pool, user, id).await.unwrap().unwrap();
    assert!(!task.completed);
}

#[tokio::test]
async fn unknown_day_tags_become_general() {
    let pool = common::memory_pool().await;
    let user = common::create_user(&pool, "ana").await;

    let id = task_service::add_task(&pool, user, "Comprar cadernos", "feriado").await.unwrap();
    let task = task_service::find_task(&pool, user, id).await.unwrap().unwrap();
    assert_eq!(task.tag(), TaskDay::General);
}

#[tokio::test]
async fn task_edits_and_cleanup() {
    let pool = common::memory_pool().await;
    let user = common::create_user(&pool, "ana").await;
    let other = common::create_user(&pool, "rui").await;

    let keep = task_service::add_task(&pool, user, "Rever apontamentos", "general").await.unwrap();
    let done = task_service::add_task(&pool, user, "Entregar trabalho", "friday").await.unwrap();
    task_service::set_completed(&pool, user, done, true).await.unwrap();

    task_service::update_text(&pool, user, keep, "Rever apontamentos de física").await.unwrap();
    let err = task_service::update_text(&pool, user, keep, "   ").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Outro utilizador não mexe nas tarefas da Ana
    let err = task_service::delete_task(&pool, other, keep).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(task_service::clear_completed(&pool, user).await.unwrap(), 1);
    let tasks = task_service::list_tasks(&pool, user).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].text, "Rever apontamentos de física");

    task_service::delete_task(&pool, user, keep).await.unwrap();
    assert!(task_service::list_tasks(&pool, user).await.unwrap().is_empty());
}

#[tokio::test]
async fn points_total_counts_from_the_last_reset() {
    let pool = common::memory_pool().await;
    let user = common::create_user(&pool, "ana").await;

    let empty = points_service::summary(&pool, user).await.unwrap();
    assert_eq!(empty.total, 0);
    assert!(empty.latest.is_none());

    points_service::add_points(&pool, user, 10).await.unwrap();
    points_service::add_points(&pool, user, 15).await.unwrap();
    assert_eq!(points_service::summary(&pool, user).await.unwrap().total, 25);

    points_service::reset_points(&pool, user).await.unwrap();
    let after_reset = points_service::summary(&pool, user).await.unwrap();
    assert_eq!(after_reset.total, 0);
    assert_eq!(after_reset.latest.map(|e| e.points), Some(0));

    points_service::add_points(&pool, user, 7).await.unwrap();
    let summary = points_service::summary(&pool, user).await.unwrap();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.latest.map(|e| e.points), Some(7));

    let history = points_service::history(&pool, user, 10).await.unwrap();
    let deltas: Vec<i64> = history.iter().map(|e| e.points).collect();
    assert_eq!(deltas, vec![7, 0, 15, 10]);

    assert!(points_service::add_points(&pool, user, 0).await.is_err());
}

#[tokio::test]
async fn files_are_stored_per_user_and_cleared() {
    let pool = common::memory_pool().await;
    let upload_dir = common::temp_dir("files");
    let ana = common::create_user(&pool, "ana").await;
    let rui = common::create_user(&pool, "rui").await;

    let record = file_service::store_file(&pool, &upload_dir, ana, "../resumo.pdf", b"%PDF-1.4 a")
        .await
        .unwrap();
    assert_eq!(record.filename, "resumo.pdf");
    assert_eq!(record.filepath, format!("{}/resumo.pdf", ana));

    // Mesmo nome: substitui o registo anterior
    file_service::store_file(&pool, &upload_dir, ana, "resumo.pdf", b"%PDF-1.4 b").await.unwrap();
    assert_eq!(file_service::list_files(&pool, ana).await.unwrap().len(), 1);

    let err = file_service::store_file(&pool, &upload_dir, ana, "virus.exe", b"MZ").await.unwrap_err();
    assert!(matches!(err, AppError::UploadError(_)));

    let (_, path) = file_service::resolve_download(&pool, &upload_dir, ana, "resumo.pdf").await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 b");

    let err = file_service::resolve_download(&pool, &upload_dir, rui, "resumo.pdf").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(file_service::clear_files(&pool, &upload_dir, ana).await.unwrap(), 1);
    assert!(!path.exists());
    assert!(file_service::list_files(&pool, ana).await.unwrap().is_empty());
    std::fs::remove_dir_all(&upload_dir).ok();
}

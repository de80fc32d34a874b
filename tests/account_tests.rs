mod common;

use study_tracker::{
    config::SeedUser,
    db,
    error::AppError,
    grid::{Day, Selection},
    services::{auth_service, file_service, points_service, schedule_service, task_service, user_service},
};

#[tokio::test]
async fn login_checks_the_password() {
    let pool = common::memory_pool().await;
    let id = common::create_user(&pool, "ana").await;

    let user = auth_service::authenticate(&pool, "ana", common::PASSWORD).await.unwrap();
    assert_eq!(user.id, id);
    assert_ne!(user.password_hash, common::PASSWORD);

    let err = auth_service::authenticate(&pool, "ana", "errada").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    let err = auth_service::authenticate(&pool, "ninguem", "x").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let pool = common::memory_pool().await;
    common::create_user(&pool, "ana").await;

    let err = user_service::create_user(&pool, "Outra Ana", " ana ", "qualquer").await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateUsername(ref u) if u == "ana"));
    assert_eq!(user_service::find_all_users(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn password_change_takes_effect() {
    let pool = common::memory_pool().await;
    let id = common::create_user(&pool, "ana").await;

    user_service::update_user_password(&pool, id, "nova-senha").await.unwrap();
    assert!(auth_service::authenticate(&pool, "ana", "nova-senha").await.is_ok());
    assert!(auth_service::authenticate(&pool, "ana", common::PASSWORD).await.is_err());

    let err = user_service::update_user_password(&pool, id + 100, "nova-senha").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_user_cascades() {
    let pool = common::memory_pool().await;
    let upload_dir = common::temp_dir("cascade");
    let ana = common::create_user(&pool, "ana").await;
    let rui = common::create_user(&pool, "rui").await;

    for user in [ana, rui] {
        let selection = Selection::at(Day::Monday, "9", 2, 2).unwrap();
        schedule_service::merge_cells(&pool, user, selection, "Cálculo", "#112233").await.unwrap();
        task_service::add_task(&pool, user, "Ler capítulo 3", "monday").await.unwrap();
        points_service::add_points(&pool, user, 12).await.unwrap();
        file_service::store_file(&pool, &upload_dir, user, "notas.pdf", b"%PDF-1.4").await.unwrap();
    }

    assert_eq!(file_service::list_files(&pool, ana).await.unwrap().len(), 1);
    // Sem clear_files: as linhas de `files` têm de cair só pelo ON DELETE CASCADE
    user_service::delete_user(&pool, ana).await.unwrap();

    for table in ["schedule", "tasks", "files", "points_log"] {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE user_id = ?1", table);
        let left: i64 = sqlx::query_scalar(&sql).bind(ana).fetch_one(&pool).await.unwrap();
        assert_eq!(left, 0, "linhas órfãs em {}", table);
        let kept: i64 = sqlx::query_scalar(&sql).bind(rui).fetch_one(&pool).await.unwrap();
        assert_eq!(kept, 1, "linhas do outro utilizador em {}", table);
    }

    let err = user_service::delete_user(&pool, ana).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    std::fs::remove_dir_all(&upload_dir).ok();
}

#[tokio::test]
async fn seed_user_is_created_once() {
    let pool = common::memory_pool().await;
    let seed = SeedUser {
        name: "Estudante".into(),
        username: "estudante".into(),
        password: "semente".into(),
    };

    db::ensure_seed_user(&pool, &seed).await.unwrap();
    db::ensure_seed_user(&pool, &seed).await.unwrap();

    let users = user_service::find_all_users(&pool).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Estudante");
}

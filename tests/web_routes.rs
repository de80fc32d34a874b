mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use sqlx::SqlitePool;
use study_tracker::{config::AppConfig, services::task_service, state::AppState, web::routes::create_router};
use tower::ServiceExt; // oneshot
use tower_sessions::{MemoryStore, SessionManagerLayer};

fn app(pool: SqlitePool) -> Router {
    let config = AppConfig {
        upload_dir: common::temp_dir("web"),
        ..AppConfig::default()
    };
    create_router(AppState::new(pool, config))
        .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Faz login e devolve o cookie de sessão ("id=...").
async fn login(app: &Router, username: &str, password: &str) -> String {
    let request = Request::post("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={}&password={}", username, password)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn anonymous_requests_go_to_login() {
    let pool = common::memory_pool().await;
    let app = app(pool);

    for uri in ["/", "/files", "/Uploads/notas.pdf"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    let response = app
        .oneshot(Request::get("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn wrong_password_shows_the_form_again() {
    let pool = common::memory_pool().await;
    common::create_user(&pool, "ana").await;
    let app = app(pool);

    let request = Request::post("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ana&password=errada"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("inválidos"));
}

#[tokio::test]
async fn logged_in_user_sees_the_grid() {
    let pool = common::memory_pool().await;
    common::create_user(&pool, "ana").await;
    let app = app(pool);
    let cookie = login(&app, "ana", common::PASSWORD).await;

    let request = Request::get("/")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("7:00"));
    assert!(html.contains("23:00"));
    assert!(html.contains("Sábado"));

    // Depois do logout a sessão deixa de valer
    let request = Request::get("/logout")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap();
    let request = Request::get("/")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn merge_form_redirects_with_feedback() {
    let pool = common::memory_pool().await;
    common::create_user(&pool, "ana").await;
    let app = app(pool);
    let cookie = login(&app, "ana", common::PASSWORD).await;

    let request = Request::post("/schedule/merge")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("day=monday&time=9&rows=1&cols=1&name=Aula&color=%23ffffff"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/?error="), "{}", location);

    let request = Request::post("/schedule/merge")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("day=monday&time=9&rows=2&cols=2&name=Aula&color=%23ffffff"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/?success="), "{}", location);
}

#[tokio::test]
async fn update_task_answers_json() {
    let pool = common::memory_pool().await;
    let user = common::create_user(&pool, "ana").await;
    let task_id = task_service::add_task(&pool, user, "Estudar", "general").await.unwrap();
    let app = app(pool.clone());
    let cookie = login(&app, "ana", common::PASSWORD).await;

    let request = Request::post("/update_task")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(format!(r#"{{"id": {}, "completed": true}}"#, task_id)))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], true);

    let task = task_service::find_task(&pool, user, task_id).await.unwrap().unwrap();
    assert!(task.completed);

    let request = Request::post("/update_task")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"id": 9999, "completed": true}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_download_is_not_found() {
    let pool = common::memory_pool().await;
    common::create_user(&pool, "ana").await;
    let app = app(pool);
    let cookie = login(&app, "ana", common::PASSWORD).await;

    let request = Request::get("/Uploads/nada.pdf")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// src/main.rs

// --- Imports ---
use axum::serve;
use study_tracker::{config::AppConfig, db, init_tracing, state::AppState, web};
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    init_tracing("study_tracker=debug,tower_http=info,sqlx=warn,tower_sessions=info");

    tracing::info!("🚀 Iniciando servidor do horário de estudo...");

    let config = AppConfig::from_env()?;

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&config.database_url, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };
    if let Some(seed) = &config.seed_user {
        db::ensure_seed_user(&db_pool, seed).await?;
    }
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // --- Configuração das Sessões ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
    session_store.migrate().await?;

    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(config.session_ttl_secs)));

    let signing_key = match config.session_secret.as_deref() {
        Some(secret) => match Key::try_from(secret.as_bytes()) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::warn!("⚠️ SESSION_SECRET inválida ({}), precisa de 64 bytes ou mais. Cookie sem assinatura.", e);
                None
            }
        },
        None => {
            tracing::warn!("⚠️ SESSION_SECRET não definida. Cookie de sessão sem assinatura.");
            None
        }
    };
    tracing::info!("🔑 Camada de sessão configurada (expira após {}s sem atividade).", config.session_ttl_secs);

    // --- Criação do Router e Aplicação das Camadas (Middlewares) ---
    let addr = config.bind_addr;
    let router = web::routes::create_router(AppState::new(db_pool, config));
    let app = match signing_key {
        Some(key) => router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(session_layer.with_signed(key)),
        ),
        None => router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(session_layer),
        ),
    };

    // --- Início do Servidor ---
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Servidor escutando em http://{}", addr);
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}

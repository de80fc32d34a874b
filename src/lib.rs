// src/lib.rs

// --- Declaração dos Módulos ---
pub mod config;
pub mod db;
pub mod desktop;
pub mod error;
pub mod grid;
pub mod models;
pub mod services;
pub mod state;
pub mod templates;
pub mod web;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Liga o tracing com `RUST_LOG` ou, na falta dele, com o filtro indicado.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // try_init: os testes podem chamar isto mais de uma vez
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

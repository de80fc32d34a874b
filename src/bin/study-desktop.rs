//! Entrada da interface de terminal.

use study_tracker::{desktop, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing("study_tracker=warn,sqlx=warn");
    if let Err(e) = desktop::run().await {
        eprintln!("Erro: {}", e);
        std::process::exit(1);
    }
}

// src/desktop/parser.rs
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Interface de terminal do horário de estudo.
/// Usa a mesma base de dados SQLite que o servidor web.
#[derive(Parser, Debug)]
#[command(
    name = "study-desktop",
    version = env!("CARGO_PKG_VERSION"),
    about = "Horário de estudo, tarefas, ficheiros e pontos no terminal",
    long_about = None
)]
pub struct Cli {
    /// Base de dados a usar (por omissão DATABASE_URL ou sqlite://study_tracker.db)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Pasta dos ficheiros enviados (por omissão UPLOAD_DIR ou ./Uploads)
    #[arg(global = true, long = "upload-dir")]
    pub upload_dir: Option<PathBuf>,

    #[arg(global = true, long = "user", env = "STUDY_USER")]
    pub user: Option<String>,

    #[arg(global = true, long = "password", env = "STUDY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Gerir utilizadores (não exige login)
    #[command(subcommand)]
    User(UserCommand),

    /// Ver e editar a grelha do horário
    #[command(subcommand)]
    Schedule(ScheduleCommand),

    /// Lista de tarefas
    #[command(subcommand)]
    Task(TaskCommand),

    /// Ficheiros de referência (PDF)
    #[command(subcommand)]
    File(FileCommand),

    /// Registo de pontos
    #[command(subcommand)]
    Points(PointsCommand),

    /// Total de pontos e mensagem semanal
    Status {
        /// Repete a leitura periodicamente
        #[arg(long)]
        watch: bool,

        /// Intervalo entre leituras, em segundos
        #[arg(long, default_value_t = 300)]
        interval: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Add {
        username: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "new-password")]
        new_password: String,
    },
    List,
    /// Apaga o utilizador, os seus dados e os seus ficheiros
    Delete { username: String },
    Passwd {
        username: String,
        #[arg(long = "new-password")]
        new_password: String,
    },
}

/// Posição de uma célula na grelha.
#[derive(Args, Debug, Clone)]
pub struct CellArgs {
    /// Dia (sabado, domingo, segunda, ... ou saturday, sunday, ...)
    pub day: String,
    /// Hora (7, 07, 7:00, 0700, ...)
    pub time: String,
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    Show,
    /// Escreve uma aula numa célula
    Set {
        #[command(flatten)]
        cell: CellArgs,
        name: String,
        #[arg(long, default_value = "#ffffff")]
        color: String,
    },
    Clear {
        #[command(flatten)]
        cell: CellArgs,
    },
    /// Funde ROWS×COLS células a partir de (dia, hora)
    Merge {
        #[command(flatten)]
        cell: CellArgs,
        #[arg(long, default_value_t = 1)]
        rows: usize,
        #[arg(long, default_value_t = 1)]
        cols: usize,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "#ffffff")]
        color: String,
    },
    Unmerge {
        #[command(flatten)]
        cell: CellArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    List,
    Add {
        text: String,
        /// Dia da semana ou "geral"
        #[arg(long, default_value = "general")]
        day: String,
    },
    Edit { id: i64, text: String },
    Toggle { id: i64 },
    Delete { id: i64 },
    ClearCompleted,
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// Copia um PDF local para a área de ficheiros
    Upload { path: PathBuf },
    List,
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum PointsCommand {
    Add { points: String },
    Reset,
    Show {
        /// Número de entradas do histórico
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

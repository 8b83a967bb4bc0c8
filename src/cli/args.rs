use clap::Parser;
use std::env;

use crate::cli::command::Command;
use crate::configuration::StorageKind;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a CRUD REST API for capybaras",
    long_about = "An HTTP service exposing create/read/update/delete endpoints for capybaras, backed by SQLite or an in-memory list, with interactive API docs.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "api-listen",
        env = "CAPYBARA_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:3000",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long,
        env = "CAPYBARA_STORAGE",
        value_enum,
        default_value_t = StorageKind::Sqlite,
        value_name = "KIND",
        help = "Storage backend"
    )]
    pub storage: StorageKind,

    #[arg(
        long,
        env = "CAPYBARA_DATA_DIR",
        default_value = ".capybara/",
        value_name = "DIR",
        help = "Directory holding the SQLite database"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "CAPYBARA_DB_NAME",
        default_value = "capybaras.sqlite",
        value_name = "FILE",
        help = "SQLite database file name inside the data directory"
    )]
    pub db_name: String,

    #[arg(
        long,
        env = "CAPYBARA_REQUEST_TIMEOUT_SECS",
        default_value_t = 10u64,
        value_parser = clap::value_parser!(u64).range(1..),
        value_name = "SECS",
        help = "Upper bound for a single storage call made by a request"
    )]
    pub request_timeout_secs: u64,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long = "log-file",
        env = "CAPYBARA_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

/// Loads the dotenv file named by `DOTENV_PATH` (default `.env`), then parses
/// arguments. Returns the dotenv path when a file was actually loaded.
pub fn parse() -> (Cli, Option<String>) {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    let loaded = dotenvy::from_filename(&dotenv_path).ok().map(|_| dotenv_path);
    (Cli::parse(), loaded)
}

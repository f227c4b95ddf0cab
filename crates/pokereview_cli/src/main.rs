//! Server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Initialize logging, prepare the store, then serve the HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use pokereview_api::{router, ApiConfig};
use pokereview_core::{default_log_level, init_logging, init_stderr_logging, open_db};

#[derive(Parser, Debug)]
#[command(name = "pokereview")]
#[command(about = "Pokemon review REST API", long_about = None, version)]
struct Cli {
    /// SQLite database file (defaults to pokereview.sqlite3 in the temp dir)
    #[arg(long = "db", env = "POKEREVIEW_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Address the HTTP server listens on
    #[arg(long, env = "POKEREVIEW_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, env = "POKEREVIEW_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when absent
    #[arg(long, env = "POKEREVIEW_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={}", err);
            eprintln!("pokereview: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    match cli.log_dir.as_deref() {
        Some(dir) => init_logging(&level, dir)?,
        None => init_stderr_logging(&level)?,
    }

    let config = match cli.db_path {
        Some(db_path) => ApiConfig { db_path },
        None => ApiConfig::default(),
    };

    // Migrate once up front so a broken store fails before binding.
    open_db(&config.db_path)
        .map_err(|err| format!("failed to open `{}`: {err}", config.db_path.display()))?;

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .map_err(|err| format!("failed to bind {}: {err}", cli.bind))?;
    info!(
        "event=server_start module=cli status=ok bind={} db={}",
        cli.bind,
        config.db_path.display()
    );

    axum::serve(listener, router(config))
        .await
        .map_err(|err| format!("server stopped: {err}"))
}

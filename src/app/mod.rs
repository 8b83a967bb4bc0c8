pub mod wiring;

use crate::configuration::StorageKind;
use crate::{cli, context, rest, storage};
use anyhow::Result;
use std::time::SystemTime;
use tokio_util::sync::CancellationToken;

pub struct App {
    pub ctx: context::Context,
}

impl App {
    pub fn from_cli() -> Result<(Self, cli::Cli)> {
        let (cli, dotenv_path) = crate::cli::parse();
        let ctx = context::Context::from_cli(&cli);

        crate::logging::init(ctx.config.log_file.as_deref());
        log::info!("🚀 Starting capybara-api");
        if let Some(path) = dotenv_path {
            log::info!("📄 Loaded env from {}", path);
        }
        log::info!("🗄️ Storage: {}", ctx.config.storage.as_str());
        if ctx.config.storage == StorageKind::Sqlite {
            log::info!("📂 Database: {}", ctx.config.db_path().display());
        }
        if let Some(path) = ctx.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.display());
        }

        Ok((Self { ctx }, cli))
    }
}

pub async fn run_server(app: App) -> Result<()> {
    match app.ctx.config.storage {
        StorageKind::Memory => serve_until_shutdown(&app.ctx, storage::MemoryStorage::new()).await,
        StorageKind::Sqlite => {
            let sqlite = wiring::init_sqlite(&app.ctx)?;
            serve_until_shutdown(&app.ctx, sqlite).await
        }
    }
}

async fn serve_until_shutdown<S>(ctx: &context::Context, storage: S) -> Result<()>
where
    S: storage::Storage + Clone + Send + Sync + 'static,
{
    log::info!(
        "⏱️ Request timeout: {}s",
        ctx.config.request_timeout.as_secs()
    );

    let shutdown = CancellationToken::new();
    let state = rest::AppState {
        storage,
        started_at: SystemTime::now(),
        storage_kind: ctx.config.storage.as_str(),
        request_timeout: ctx.config.request_timeout,
    };

    let api_addr = ctx.config.api_listen;
    let rest_shutdown = shutdown.clone();
    let mut rest_handle =
        tokio::spawn(async move { rest::serve(api_addr, state, rest_shutdown).await });

    let early_exit = tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("🧨 Ctrl-C received, shutting down");
            None
        }
        result = &mut rest_handle => Some(result),
    };

    shutdown.cancel();
    let result = match early_exit {
        Some(result) => result,
        None => rest_handle.await,
    };

    match result {
        Ok(Ok(())) => {
            log::info!("✅ Shutdown complete");
            Ok(())
        }
        Ok(Err(e)) => {
            log::error!("REST server error: {}", e);
            Err(e)
        }
        Err(e) => {
            log::error!("REST task failed: {}", e);
            Err(e.into())
        }
    }
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        // one-shot command mode
        cmd.run(&app.ctx)?;
        return Ok(());
    }

    run_server(app).await
}

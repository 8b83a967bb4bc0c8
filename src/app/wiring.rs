use crate::{context, storage};
use anyhow::{Context, Result};

pub fn init_data_dir(ctx: &context::Context) -> Result<()> {
    std::fs::create_dir_all(&ctx.config.data_dir)?;
    Ok(())
}

/// Prepares the SQLite database: honors `--reset`, then creates or verifies
/// the schema.
pub fn init_sqlite(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    init_data_dir(ctx).context("initializing data dir")?;
    let sqlite = storage::SqliteStorage::new(ctx.config.db_path());
    if ctx.config.reset {
        log::info!("🧹 Resetting database {}", sqlite.path);
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    Ok(sqlite)
}

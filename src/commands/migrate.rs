use anyhow::Result;

use crate::app::wiring;
use crate::configuration::StorageKind;
use crate::context;

pub fn run(ctx: &context::Context) -> Result<()> {
    if ctx.config.storage == StorageKind::Memory {
        log::warn!("Storage is memory; nothing to migrate");
        return Ok(());
    }
    let sqlite = wiring::init_sqlite(ctx)?;
    log::info!("✅ Schema ready at {}", sqlite.path);
    Ok(())
}

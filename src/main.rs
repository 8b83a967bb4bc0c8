mod app;
mod cli;
mod commands;
mod configuration;
mod context;
mod logging;
mod rest;
mod storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}

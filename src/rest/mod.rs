use std::net::SocketAddr;
use std::time::{Duration, SystemTime};

use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

use crate::storage::Storage;

mod docs;
mod error;
mod handlers;
mod models;

use handlers::{
    create_capybara, delete_capybara, get_capybara, health, list_capybaras, not_found,
    update_capybara,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: SystemTime,
    pub storage_kind: &'static str,
    pub request_timeout: Duration,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(docs::swagger_ui))
        .route("/api-docs", get(docs::swagger_ui))
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))
        .route("/health", get(health::<S>))
        .route(
            "/capybaras",
            get(list_capybaras::<S>).post(create_capybara::<S>),
        )
        .route(
            "/capybaras/:id",
            get(get_capybara::<S>)
                .put(update_capybara::<S>)
                .delete(delete_capybara::<S>),
        )
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    state: AppState<S>,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}

use std::{fmt, num::ParseIntError};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::storage::Storage;

use super::{
    error::ApiError,
    models::{CapybaraRequest, CapybaraResponse, ErrorResponse, HealthResponse},
    AppState,
};

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_secs,
            storage: state.storage_kind,
        }),
    )
}

pub async fn list_capybaras<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<CapybaraResponse>>, ApiError> {
    let capybaras = run_storage(&state, |storage| storage.list_capybaras()).await?;
    Ok(Json(
        capybaras.into_iter().map(CapybaraResponse::from).collect(),
    ))
}

pub async fn get_capybara<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<CapybaraResponse>, ApiError> {
    let id = path_id(id)?;
    run_storage(&state, move |storage| storage.load_capybara(id))
        .await?
        .map(|capybara| Json(CapybaraResponse::from(capybara)))
        .ok_or(ApiError::NotFound)
}

pub async fn create_capybara<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<CapybaraRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let name = required_name(body)?;
    let created = run_storage(&state, move |storage| storage.insert_capybara(&name)).await?;
    log::info!("Created capybara {} ({})", created.id, created.name);
    Ok((StatusCode::CREATED, Json(CapybaraResponse::from(created))))
}

/// Existence is checked before the body is validated, so an unknown id is a
/// 404 whatever the payload looks like.
pub async fn update_capybara<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<CapybaraRequest>, JsonRejection>,
) -> Result<Json<CapybaraResponse>, ApiError> {
    let id = path_id(id)?;
    if run_storage(&state, move |storage| storage.load_capybara(id))
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound);
    }

    let name = required_name(body)?;
    let updated = run_storage(&state, move |storage| storage.update_capybara(id, &name))
        .await?
        // Deleted between the lookup and the update.
        .ok_or(ApiError::NotFound)?;
    log::info!("Renamed capybara {} to {}", updated.id, updated.name);
    Ok(Json(CapybaraResponse::from(updated)))
}

pub async fn delete_capybara<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    if run_storage(&state, move |storage| storage.delete_capybara(id)).await? {
        log::info!("Deleted capybara {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

/// Runs a storage call on the blocking pool, bounded by the request timeout.
/// A call that panics or outlives the timeout surfaces as a storage error.
async fn run_storage<S, F, T>(state: &AppState<S>, op: F) -> Result<T, ApiError>
where
    S: Storage + Clone + Send + Sync + 'static,
    F: FnOnce(&S) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let storage = state.storage.clone();
    let task = tokio::task::spawn_blocking(move || op(&storage));
    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(err)) => Err(ApiError::Storage(format!("storage task failed: {err}"))),
        Err(_) => Err(ApiError::Storage(format!(
            "storage call timed out after {}ms",
            state.request_timeout.as_millis()
        ))),
    }
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let raw = match path {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            log::warn!("Rejected capybara id: {}", rejection.body_text());
            return Err(ApiError::InvalidId);
        }
    };
    parse_capybara_id(&raw).map_err(|err| {
        log::warn!("Invalid capybara id {}: {}", raw, err);
        ApiError::InvalidId
    })
}

fn required_name(body: Result<Json<CapybaraRequest>, JsonRejection>) -> Result<String, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::warn!("Rejected capybara payload: {}", rejection.body_text());
            return Err(ApiError::NameRequired);
        }
    };
    match request.name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ApiError::NameRequired),
    }
}

fn parse_capybara_id(raw: &str) -> Result<i64, IdParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdParseError::Empty);
    }
    trimmed.parse::<i64>().map_err(IdParseError::InvalidInteger)
}

#[derive(Debug)]
enum IdParseError {
    Empty,
    InvalidInteger(ParseIntError),
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParseError::Empty => write!(f, "capybara id is empty"),
            IdParseError::InvalidInteger(err) => write!(f, "invalid integer id: {}", err),
        }
    }
}

impl std::error::Error for IdParseError {}

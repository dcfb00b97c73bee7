use std::io::Read;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use cask_store::StorageResult;
use serde_json::{json, Value};

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;
use crate::sniff;

/// Health check handler.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": "cask-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET `/v1/fileserver/{key}` — stream the stored file back.
pub async fn read_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServerResult<Response> {
    let storage = state.storage.clone();
    let read_key = key.clone();
    let data = run_blocking(move || {
        let mut reader = storage.read_stream(&read_key)?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
    .await?;

    let content_type = sniff::detect(&data);
    tracing::debug!(%key, bytes = data.len(), content_type, "serving file");
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}

/// POST `/v1/fileserver/{key}` — store the multipart `file` field.
pub async fn write_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
    mut multipart: Multipart,
) -> ServerResult<Response> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let data = field.bytes().await?;
        let storage = state.storage.clone();
        let write_key = key.clone();
        let written =
            run_blocking(move || storage.write_stream(&write_key, &mut data.as_ref())).await?;

        tracing::info!(%key, bytes = written, "file uploaded");
        return Ok((
            StatusCode::OK,
            Json(json!({
                "message": format!("file {key} uploaded successfully"),
                "bytes": written,
            })),
        )
            .into_response());
    }
    Err(ServerError::MissingFilePart)
}

/// DELETE `/v1/fileserver/{key}` — remove the file and prune empty shards.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServerResult<Json<Value>> {
    let storage = state.storage.clone();
    let delete_key = key.clone();
    run_blocking(move || storage.delete(&delete_key)).await?;

    tracing::info!(%key, "file deleted");
    Ok(Json(json!({
        "message": format!("file {key} deleted successfully"),
    })))
}

/// Run a synchronous storage operation off the async runtime.
async fn run_blocking<T, F>(f: F) -> ServerResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .map_err(Into::into)
}

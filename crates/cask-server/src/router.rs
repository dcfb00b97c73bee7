use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use cask_store::Storage;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
}

/// Build the axum router with all file-server endpoints.
pub fn build_router(storage: Storage, max_upload_size: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health))
        .route(
            "/v1/fileserver/:key",
            get(handler::read_file)
                .post(handler::write_file)
                .delete(handler::delete_file),
        )
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { storage })
}

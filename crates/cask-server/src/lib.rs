//! HTTP file server over [`cask_store`].
//!
//! Maps REST verbs onto storage operations, all under `/v1`:
//!
//! - `GET /v1/fileserver/{key}` — download; content type sniffed from the
//!   stored bytes.
//! - `POST /v1/fileserver/{key}` — upload via the multipart `file` field.
//! - `DELETE /v1/fileserver/{key}` — remove the file and prune emptied
//!   shard directories.
//! - `GET /v1/health` — liveness probe.
//!
//! Storage errors translate to HTTP statuses: malformed keys are 400, a
//! missing file is 404, and environmental I/O failures are 500. Storage
//! calls are synchronous and run on the blocking thread pool.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod sniff;

pub use config::{PathScheme, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::CaskServer;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use cask_store::{CasTransform, Storage, StorageOptions};
    use tower::util::ServiceExt;

    use crate::router::build_router;

    // `^` must be percent-encoded in request URIs.
    const UPLOAD_KEY: &str = "user1%5Eabc.pdf";

    fn test_router(dir: &tempfile::TempDir) -> axum::Router {
        let root = dir.path().join("store").to_str().unwrap().to_string();
        let storage = Storage::new(StorageOptions::new(root, Arc::new(CasTransform)));
        build_router(storage, 1024 * 1024)
    }

    fn upload_request(key: &str, content: &str) -> Request<Body> {
        let boundary = "cask-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"abc.pdf\"\r\n\
             \r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(format!("/v1/fileserver/{key}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(key: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/v1/fileserver/{key}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn upload_download_delete_flow() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);

        let response = app
            .clone()
            .oneshot(upload_request(UPLOAD_KEY, "some text"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request(UPLOAD_KEY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"some text");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/v1/fileserver/{UPLOAD_KEY}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get_request(UPLOAD_KEY)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn download_of_missing_key_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);
        let response = app
            .oneshot(get_request("user9%5Enothing.txt"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_key_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);
        let response = app.oneshot(get_request("no-separator")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);

        let boundary = "cask-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"other\"\r\n\
             \r\n\
             ignored\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(format!("/v1/fileserver/{UPLOAD_KEY}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_missing_key_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_router(&dir);
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/fileserver/user9%5Enothing.txt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

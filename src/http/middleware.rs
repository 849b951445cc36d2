//! Request interceptor.
//!
//! # Responsibilities
//! - Generate and install the per-request correlation id
//! - Log request entry and exit with timing
//! - Guarantee the correlation context is cleared on every exit path
//!
//! # Design Decisions
//! - The correlation slot is scoped to the request's task; a drop guard
//!   clears it even when the handler unwinds
//! - Server errors are logged at ERROR with the failure's source chain and
//!   passed through unchanged; the interceptor never rewrites a response

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::fields;
use crate::http::response::FailureDetail;
use crate::logging::correlation::{self, RequestId};
use crate::logging::{Level, Logger};

const LOG: Logger = Logger::new("http.request");

/// Clears the correlation slot when dropped, so success, error, and panic
/// paths all release the request id exactly once.
struct ClearOnDrop;

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        correlation::clear();
    }
}

/// Middleware wrapped around every route.
pub async fn correlate(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    correlation::scope(async move {
        correlation::set(RequestId::generate());
        let _guard = ClearOnDrop;
        let start = Instant::now();

        let mut entry = fields! { "method" => &method, "path" => &path };
        if let Some(client) = &client {
            entry.insert("client".to_string(), serde_json::Value::String(client.clone()));
        }
        LOG.info_with("Request received", entry);

        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response.extensions().get::<FailureDetail>() {
            Some(failure) if response.status().is_server_error() => {
                LOG.log(
                    Level::Error,
                    &format!("Request failed: {}", failure.message),
                    Some(fields! {
                        "method" => &method,
                        "path" => &path,
                        "duration_ms" => duration_ms,
                    }),
                    Some(failure.detail.clone()),
                );
            }
            _ => {
                LOG.info_with(
                    "Request completed",
                    fields! {
                        "method" => &method,
                        "path" => &path,
                        "status" => response.status().as_u16(),
                        "duration_ms" => duration_ms,
                    },
                );
            }
        }

        response
    })
    .await
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_guard_clears_exactly_once() {
        correlation::scope(async {
            correlation::set(RequestId::from("ab12cd34"));
            {
                let _guard = ClearOnDrop;
            }
            assert_eq!(correlation::get(), None);
        })
        .await;
    }

    #[tokio::test]
    async fn test_handler_observes_installed_id() {
        let seen: Arc<Mutex<Option<RequestId>>> = Arc::new(Mutex::new(None));
        let observed = seen.clone();

        let app = Router::new()
            .route(
                "/probe",
                get(move || {
                    let observed = observed.clone();
                    async move {
                        *observed.lock().unwrap() = correlation::get();
                        "ok"
                    }
                }),
            )
            .layer(axum::middleware::from_fn(correlate));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/probe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = seen.lock().unwrap().clone().expect("handler saw no id");
        assert_eq!(id.as_str().len(), 8);
        // The id does not outlive the request.
        assert_eq!(correlation::get(), None);
    }

    #[tokio::test]
    async fn test_consecutive_requests_get_distinct_ids() {
        let seen: Arc<Mutex<Vec<RequestId>>> = Arc::new(Mutex::new(Vec::new()));
        let observed = seen.clone();

        let app = Router::new()
            .route(
                "/probe",
                get(move || {
                    let observed = observed.clone();
                    async move {
                        if let Some(id) = correlation::get() {
                            observed.lock().unwrap().push(id);
                        }
                        "ok"
                    }
                }),
            )
            .layer(axum::middleware::from_fn(correlate));

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    HttpRequest::builder()
                        .uri("/probe")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let ids = seen.lock().unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}

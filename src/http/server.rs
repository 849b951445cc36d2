//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (CORS, timeout, trace, request interceptor)
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::fields;
use crate::http::{handlers, middleware};
use crate::logging::Logger;
use crate::suppression::SuppressionService;

const LOG: Logger = Logger::new("http.server");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub suppression: Arc<SuppressionService>,
}

/// HTTP server for the suppression API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and service.
    pub fn new(settings: Arc<Settings>, suppression: Arc<SuppressionService>) -> Self {
        let state = AppState {
            settings: settings.clone(),
            suppression,
        };
        Self {
            router: Self::build_router(&settings, state),
        }
    }

    /// Build the Axum router with all middleware layers. The interceptor
    /// sits closest to the handlers; trace and CORS wrap the outside.
    fn build_router(settings: &Settings, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route(
                "/api/v1/email-suppression/{email}",
                get(handlers::check_suppression).delete(handlers::remove_suppression),
            )
            .with_state(state)
            .layer(axum::middleware::from_fn(middleware::correlate))
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.server.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        LOG.info_with("HTTP server starting", fields! { "address" => addr.to_string() });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        LOG.info("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    LOG.info("Shutdown signal received");
}

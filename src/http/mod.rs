//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, timeout, trace)
//!     → middleware.rs (correlation id, entry/exit logging)
//!     → handlers.rs (suppression endpoints, health)
//!     → response.rs (error mapping, failure detail handoff)
//! ```

pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use response::ApiError;
pub use server::{AppState, HttpServer};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (read & coerce, defaults for anything unset)
//!     → Settings (immutable once loaded)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Every field has a default so an empty environment still boots
//! - Invalid logging values degrade to safe defaults instead of failing
//!   startup; the fallback lives where the value is consumed

pub mod loader;
pub mod schema;

pub use schema::{LoggingConfig, ProviderConfig, ServerConfig, ServiceConfig, Settings};

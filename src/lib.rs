//! Email suppression service.
//!
//! A small HTTP API for checking and removing entries from a cloud email
//! delivery suppression list, built around a request-scoped structured
//! logging pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │             SUPPRESSION SERVICE              │
//!                     │                                              │
//!   Client Request    │  ┌────────┐   ┌────────────┐   ┌──────────┐  │
//!   ──────────────────┼─▶│  http  │──▶│ middleware │──▶│ handlers │  │
//!                     │  │ server │   │ (req id)   │   └────┬─────┘  │
//!                     │  └────────┘   └────────────┘        │        │
//!                     │                                     ▼        │
//!                     │                            ┌──────────────┐  │
//!                     │                            │ suppression  │──┼──▶ Provider
//!                     │                            │ service/api  │  │    control plane
//!                     │                            └──────────────┘  │
//!                     │                                              │
//!                     │  ┌────────────────────────────────────────┐  │
//!                     │  │           Cross-Cutting Concerns       │  │
//!                     │  │  ┌────────┐  ┌─────────────────────┐   │  │
//!                     │  │  │ config │  │ logging (sink,      │   │  │
//!                     │  │  │        │  │ format, correlation)│   │  │
//!                     │  │  └────────┘  └─────────────────────┘   │  │
//!                     │  └────────────────────────────────────────┘  │
//!                     └──────────────────────────────────────────────┘
//! ```
//!
//! Every log record emitted while a request is in flight carries that
//! request's correlation id, without the id appearing in any function
//! signature.

pub mod config;
pub mod http;
pub mod logging;
pub mod suppression;

pub use config::Settings;
pub use http::HttpServer;
pub use logging::{configure_logging, Logger};

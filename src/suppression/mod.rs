//! Email suppression subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → service.rs (check/remove semantics, context logging)
//!     → client.rs (provider REST calls, error decoding)
//!     → provider control plane
//! ```
//!
//! # Design Decisions
//! - The provider surface is a trait so tests run against a mock
//! - Removal checks first; removing an absent entry is an error, not a
//!   silent no-op

pub mod client;
pub mod service;
pub mod types;

pub use client::{EmailDeliveryClient, ProviderError, SuppressionApi};
pub use service::{SuppressionError, SuppressionService};
pub use types::{RemovalReceipt, SuppressionDetail, SuppressionEntry, SuppressionStatus};

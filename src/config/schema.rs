//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry defaults so a minimal
//! environment still produces a complete, valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the suppression service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Service identity reported by the health endpoints.
    pub service: ServiceConfig,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Email delivery provider settings.
    pub provider: ProviderConfig,

    /// Logging pipeline settings.
    pub logging: LoggingConfig,
}

/// Service identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Human-readable service title.
    pub title: String,

    /// Reported version.
    pub version: String,

    /// One-line description.
    pub description: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            title: "Email Suppression Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "HTTP API for checking and removing email delivery suppressions"
                .to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Email delivery provider settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Tenancy OCID the suppression list lives under.
    pub tenancy_ocid: String,

    /// Provider region identifier.
    pub region: String,

    /// Explicit control-plane endpoint. When unset, derived from the
    /// region.
    pub endpoint: Option<String>,

    /// Security token attached as bearer auth. When unset, requests go out
    /// unauthenticated (useful against local stubs only).
    pub security_token: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            tenancy_ocid:
                "ocid1.tenancy.oc1..aaaaaaaabyypi3rfbeajp3lix4wwkrmsewwvz2rezuneuxnpmnl76eufa3oa"
                    .to_string(),
            region: "ap-mumbai-1".to_string(),
            endpoint: None,
            security_token: None,
        }
    }
}

/// Logging pipeline settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum severity to emit (debug, info, warning, error).
    pub level: String,

    /// Output format: "json" or "text".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            format: "json".to_string(),
        }
    }
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use suppression_service::config::Settings;
use suppression_service::http::HttpServer;
use suppression_service::suppression::client::{ProviderError, SuppressionApi};
use suppression_service::suppression::{SuppressionEntry, SuppressionService};

/// In-process provider stand-in with programmable entries, failure, and
/// latency.
pub struct MockProvider {
    pub entries: Vec<SuppressionEntry>,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
}

impl MockProvider {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            fail_with: None,
            delay: None,
        }
    }

    #[allow(dead_code)]
    pub fn with_entries(entries: Vec<SuppressionEntry>) -> Self {
        Self {
            entries,
            fail_with: None,
            delay: None,
        }
    }

    #[allow(dead_code)]
    pub fn failing(message: &str) -> Self {
        Self {
            entries: Vec::new(),
            fail_with: Some(message.to_string()),
            delay: None,
        }
    }

    #[allow(dead_code)]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl SuppressionApi for MockProvider {
    async fn list_suppressions(
        &self,
        _compartment_id: &str,
        email: &str,
    ) -> Result<Vec<SuppressionEntry>, ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_with {
            Some(message) => Err(ProviderError::Service {
                status: 500,
                code: "InternalError".to_string(),
                message: message.clone(),
            }),
            None => Ok(self
                .entries
                .iter()
                .filter(|entry| entry.email_address == email)
                .cloned()
                .collect()),
        }
    }

    async fn delete_suppression(&self, _suppression_id: &str) -> Result<(), ProviderError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

/// Fabricate a provider entry for `email`.
#[allow(dead_code)]
pub fn entry(email: &str) -> SuppressionEntry {
    SuppressionEntry {
        id: format!("ocid1.suppression.oc1..{}", email.replace(['@', '.'], "")),
        email_address: email.to_string(),
        reason: "HARDBOUNCE".to_string(),
        time_created: "2024-03-01T10:00:00.000Z".to_string(),
    }
}

/// Start the service on an ephemeral port, backed by `provider`.
pub async fn start_server(provider: MockProvider) -> SocketAddr {
    let settings = Arc::new(Settings::default());
    let suppression = Arc::new(SuppressionService::new(
        Arc::new(provider),
        settings.provider.tenancy_ocid.clone(),
    ));
    let server = HttpServer::new(settings, suppression);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

//! REST client for the provider's email delivery control plane.
//!
//! # Responsibilities
//! - List suppression entries filtered by address
//! - Delete a suppression entry by id
//! - Decode the provider's error body into a typed error
//!
//! # Design Decisions
//! - The API surface is a trait so the service can run against a mock
//! - Authentication is a bearer security token; request signing stays
//!   behind the provider boundary

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::suppression::types::SuppressionEntry;

/// Failures surfaced by the provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a usable response.
    #[error("request to email delivery API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with an error status.
    #[error("email delivery API returned {status} ({code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },
}

/// The provider operations the suppression service needs.
#[async_trait]
pub trait SuppressionApi: Send + Sync {
    /// Suppression entries matching `email` within `compartment_id`.
    async fn list_suppressions(
        &self,
        compartment_id: &str,
        email: &str,
    ) -> Result<Vec<SuppressionEntry>, ProviderError>;

    /// Delete the entry with the given id.
    async fn delete_suppression(&self, suppression_id: &str) -> Result<(), ProviderError>;
}

/// reqwest-backed client against the region's control-plane endpoint.
pub struct EmailDeliveryClient {
    http: reqwest::Client,
    endpoint: String,
    security_token: Option<String>,
}

impl EmailDeliveryClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| endpoint_for_region(&config.region));
        Ok(Self {
            http,
            endpoint,
            security_token: config.security_token.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.security_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: ServiceErrorBody = response.json().await.unwrap_or_default();
        Err(ProviderError::Service {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        })
    }
}

#[async_trait]
impl SuppressionApi for EmailDeliveryClient {
    async fn list_suppressions(
        &self,
        compartment_id: &str,
        email: &str,
    ) -> Result<Vec<SuppressionEntry>, ProviderError> {
        let response = self
            .authorize(self.http.get(format!("{}/suppressions", self.endpoint)))
            .query(&[("compartmentId", compartment_id), ("emailAddress", email)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<Vec<SuppressionEntry>>().await?)
    }

    async fn delete_suppression(&self, suppression_id: &str) -> Result<(), ProviderError> {
        let response = self
            .authorize(
                self.http
                    .delete(format!("{}/suppressions/{}", self.endpoint, suppression_id)),
            )
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

fn endpoint_for_region(region: &str) -> String {
    format!("https://ctrl.email.{region}.oci.oraclecloud.com/20170907")
}

/// Error body shape the provider returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceErrorBody {
    code: String,
    message: String,
}

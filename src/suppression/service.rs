//! Suppression list operations.

use std::sync::Arc;

use thiserror::Error;

use crate::fields;
use crate::logging::Logger;
use crate::suppression::client::{ProviderError, SuppressionApi};
use crate::suppression::types::{
    RemovalReceipt, SuppressionDetail, SuppressionStatus, SuppressionEntry,
};

const LOG: Logger = Logger::new("suppression.service");

/// Failures surfaced by the suppression operations.
#[derive(Debug, Error)]
pub enum SuppressionError {
    /// Removal was requested for an address that is not suppressed.
    #[error("Email '{email}' is not in the suppression list")]
    NotSuppressed { email: String },

    /// The provider call failed; `context` names the operation.
    #[error("{context}: {source}")]
    Provider {
        context: String,
        #[source]
        source: ProviderError,
    },
}

/// Service for checking and removing email delivery suppressions.
pub struct SuppressionService {
    api: Arc<dyn SuppressionApi>,
    compartment_id: String,
}

impl SuppressionService {
    pub fn new(api: Arc<dyn SuppressionApi>, compartment_id: String) -> Self {
        Self { api, compartment_id }
    }

    /// Check whether `email` is in the suppression list.
    pub async fn check_suppression(
        &self,
        email: &str,
    ) -> Result<SuppressionStatus, SuppressionError> {
        LOG.info_with("Checking suppression list", fields! { "email" => email });

        let entries = self
            .api
            .list_suppressions(&self.compartment_id, email)
            .await
            .map_err(|source| SuppressionError::Provider {
                context: format!("Failed to check suppression for {email}"),
                source,
            })?;

        match entries.into_iter().next() {
            None => {
                LOG.info_with("Email is not suppressed", fields! { "email" => email });
                Ok(SuppressionStatus {
                    email: email.to_string(),
                    is_suppressed: false,
                    suppression: None,
                })
            }
            Some(entry) => {
                LOG.info_with(
                    "Email is suppressed",
                    fields! {
                        "email" => email,
                        "suppression_id" => &entry.id,
                        "reason" => &entry.reason,
                    },
                );
                Ok(status_for(email, entry))
            }
        }
    }

    /// Remove `email` from the suppression list. Fails with
    /// [`SuppressionError::NotSuppressed`] when the address is not listed.
    pub async fn remove_suppression(
        &self,
        email: &str,
    ) -> Result<RemovalReceipt, SuppressionError> {
        let status = self.check_suppression(email).await?;

        let Some(detail) = status.suppression else {
            LOG.warning_with(
                "Removal requested for address that is not suppressed",
                fields! { "email" => email },
            );
            return Err(SuppressionError::NotSuppressed {
                email: email.to_string(),
            });
        };

        LOG.info_with(
            "Removing suppression",
            fields! { "email" => email, "suppression_id" => &detail.id },
        );

        self.api
            .delete_suppression(&detail.id)
            .await
            .map_err(|source| SuppressionError::Provider {
                context: format!("Failed to remove suppression for {email}"),
                source,
            })?;

        LOG.info_with(
            "Suppression removed",
            fields! { "email" => email, "suppression_id" => &detail.id },
        );

        Ok(RemovalReceipt {
            message: format!(
                "Email '{email}' has been successfully removed from the suppression list"
            ),
            email: email.to_string(),
            removed: true,
            suppression_id: detail.id,
            previous_reason: detail.reason,
            previous_time_created: detail.time_created,
        })
    }
}

fn status_for(email: &str, entry: SuppressionEntry) -> SuppressionStatus {
    SuppressionStatus {
        email: email.to_string(),
        is_suppressed: true,
        suppression: Some(SuppressionDetail {
            id: entry.id,
            reason: entry.reason,
            time_created: entry.time_created,
        }),
    }
}

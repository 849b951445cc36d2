//! Suppression domain types.

use serde::{Deserialize, Serialize};

/// A suppression record as the provider returns it. The provider's wire
/// format is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuppressionEntry {
    pub id: String,
    #[serde(default)]
    pub email_address: String,
    pub reason: String,
    pub time_created: String,
}

/// Details about a suppression entry, as surfaced by this API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionDetail {
    pub id: String,
    pub reason: String,
    pub time_created: String,
}

/// Result of checking an address against the suppression list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressionStatus {
    pub email: String,
    pub is_suppressed: bool,
    pub suppression: Option<SuppressionDetail>,
}

/// Result of removing an address from the suppression list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovalReceipt {
    pub message: String,
    pub email: String,
    pub removed: bool,
    pub suppression_id: String,
    pub previous_reason: String,
    pub previous_time_created: String,
}

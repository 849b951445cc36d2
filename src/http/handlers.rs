//! Route handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::suppression::{RemovalReceipt, SuppressionStatus};

/// Basic health check.
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.settings.service.title,
        "version": state.settings.service.version,
    }))
}

/// Detailed health check: configuration summary and available endpoints.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": state.settings.service.title,
        "version": state.settings.service.version,
        "region": state.settings.provider.region,
        "endpoints": {
            "health": "/health",
            "email_suppression": {
                "check": "GET /api/v1/email-suppression/{email}",
                "remove": "DELETE /api/v1/email-suppression/{email}",
            },
        },
    }))
}

/// Check whether an email address is in the suppression list.
pub async fn check_suppression(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<SuppressionStatus>, ApiError> {
    let status = state.suppression.check_suppression(&email).await?;
    Ok(Json(status))
}

/// Remove an email address from the suppression list. 404 when the address
/// is not listed.
pub async fn remove_suppression(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RemovalReceipt>, ApiError> {
    let receipt = state.suppression.remove_suppression(&email).await?;
    Ok(Json(receipt))
}

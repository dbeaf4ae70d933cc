//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when the menu can be read
    pub status: String,
}

/// Healthcheck handler
///
/// Unauthenticated. Reads the menu to prove the database answers.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Service healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(error) = state.app.catalog.list_items(false).await {
        tracing::error!("healthcheck failed: {error}");

        return Err(StatusError::service_unavailable().brief("Database unreachable"));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

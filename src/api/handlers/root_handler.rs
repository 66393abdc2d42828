//! Root layout loader and health check.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::OptionalUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::infra::HealthCheck;

/// Data every page layout is rendered from
#[derive(Debug, Serialize, ToSchema)]
pub struct RootData {
    /// The signed-in user, `null` when anonymous
    pub user: Option<UserResponse>,
}

/// Root layout loader
#[utoipa::path(
    get,
    path = "/",
    tag = "Layout",
    responses(
        (status = 200, description = "Current user, if signed in", body = RootData)
    )
)]
pub async fn root(OptionalUser(user): OptionalUser) -> Json<RootData> {
    Json(RootData {
        user: user.map(UserResponse::from),
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
pub struct ServiceHealth {
    database: ServiceStatus,
    redis: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
pub struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

async fn probe(target: &dyn HealthCheck) -> ServiceStatus {
    match target.ping().await {
        Ok(()) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    }
}

/// Health check endpoint with database and Redis connectivity check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable"),
        (status = 503, description = "A dependency is unreachable")
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (database, redis) = tokio::join!(
        probe(state.database.as_ref()),
        probe(state.cache.as_ref())
    );

    let all_healthy = database.is_healthy() && redis.is_healthy();
    if !all_healthy {
        tracing::warn!(
            database = database.status,
            redis = redis.status,
            "Health check degraded"
        );
    }

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, redis },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

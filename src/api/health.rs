use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::DocumentStore;

pub const LIVENESS_MESSAGE: &str = "PlateShare API Server Running...";

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    )
)]
pub async fn liveness() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: String,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and database are reachable", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn DocumentStore>) -> impl Responder {
    let (status, database, mut builder) = match store.ping().await {
        Ok(()) => ("healthy", "connected".to_string(), HttpResponse::Ok()),
        Err(e) => {
            log::warn!("⚠️  Health check: database unreachable: {}", e);
            ("degraded", format!("unreachable: {}", e), HttpResponse::ServiceUnavailable())
        }
    };

    builder.json(HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: chrono::Utc::now().timestamp(),
    })
}

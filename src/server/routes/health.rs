//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Basic health check endpoint
///
/// Used by load balancers and monitoring; reports the service as healthy
/// whenever the process is serving requests.
pub async fn health_check(_state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Health status payload
#[derive(Debug, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

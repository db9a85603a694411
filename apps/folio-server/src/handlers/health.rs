//! Health check endpoint.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use folio_core::domain::Category;
use folio_shared::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - reports whether the blog storage is usable.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let seeded = Category::uncategorised(&*state.categories).await;

    let status = match &seeded {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            "degraded"
        }
    };

    let response = HealthResponse {
        status: status.to_string(),
        service: state.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.as_str().to_string(),
        timestamp: Utc::now(),
    };

    if seeded.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

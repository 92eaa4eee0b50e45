//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use inkwell_shared::dto::iso_utc;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store.as_str(),
        timestamp: iso_utc(&chrono::Utc::now()),
    };

    HttpResponse::Ok().json(response)
}

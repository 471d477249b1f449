//! # API Routes Module
//!
//! Configures HTTP routes for the relayer service API.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/deposits`, `/forwarders`, `/withdrawals` - Relayer operations

pub mod health;
pub mod relayer;

use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::api::ApiDoc;

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init)
        .configure(relayer::init)
        .route("/openapi.json", web::get().to(openapi_json));
}

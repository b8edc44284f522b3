use actix_web::{HttpResponse, Responder, web};

use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/health/db").route(web::get().to(database_status)));
}

async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION,
        "uptime_secs": state.started_at.elapsed().as_secs()
    }))
}

async fn database_status(state: web::Data<AppState>) -> impl Responder {
    let store = if state.config.uses_memory_store() { "memory" } else { "sqlite" };

    match state.notes.count_notes() {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "store": store,
            "notes": count
        })),
        Err(e) => {
            log::error!("[DB] Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "error",
                "error": "Database unavailable"
            }))
        }
    }
}

pub mod comision_routes;
pub mod mecanico_routes;
pub mod trabajo_routes;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(bienvenida))
        .route("/health", get(health_check))
        .nest("/api/mecanicos", mecanico_routes::create_mecanico_router())
        .nest("/api/trabajos", trabajo_routes::create_trabajo_router())
        .nest("/api/comisiones", comision_routes::create_comision_router())
}

async fn bienvenida() -> Json<serde_json::Value> {
    Json(json!({ "message": "Bienvenido a Auto Andrade API" }))
}

/// Liveness con ping a la base de datos
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

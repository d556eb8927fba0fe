use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use crate::controllers::comision_controller::ComisionController;
use crate::dto::comision_dto::{
    CambiarEstadoRequest, CambiarEstadoResponse, ComisionesQuincenaResponse,
    GenerarQuincenaResponse, ReporteFinancieroResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_comision_router() -> Router<AppState> {
    Router::new()
        .route("/generar-quincena/:quincena", post(generar_quincena))
        .route("/quincena/:quincena", get(comisiones_quincena))
        .route("/:id/estado", put(cambiar_estado_comision))
        .route("/reporte-financiero/:quincena", get(reporte_financiero))
}

async fn generar_quincena(
    State(state): State<AppState>,
    Path(quincena): Path<String>,
) -> Result<Json<GenerarQuincenaResponse>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.generar_quincena(&quincena).await?;
    Ok(Json(response))
}

async fn comisiones_quincena(
    State(state): State<AppState>,
    Path(quincena): Path<String>,
) -> Result<Json<ComisionesQuincenaResponse>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.comisiones_de_quincena(&quincena).await?;
    Ok(Json(response))
}

async fn cambiar_estado_comision(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CambiarEstadoRequest>,
) -> Result<Json<CambiarEstadoResponse>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.cambiar_estado(id, request).await?;
    Ok(Json(response))
}

async fn reporte_financiero(
    State(state): State<AppState>,
    Path(quincena): Path<String>,
) -> Result<Json<ReporteFinancieroResponse>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.reporte_financiero(&quincena).await?;
    Ok(Json(response))
}

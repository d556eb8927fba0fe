use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use crate::controllers::trabajo_controller::TrabajoController;
use crate::dto::trabajo_dto::{
    ActualizarTrabajoResponse, AsignacionMecanicoResponse, AsignarMecanicosRequest,
    CreateTrabajoRequest, CrearTrabajoResponse, DetalleGastoResponse, MecanicoAsignadoResponse,
    TrabajoDetalleResponse, TrabajoResponse, UpdateTrabajoRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trabajo_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_trabajo))
        .route("/", get(listar_trabajos))
        .route("/trabajo/:id", get(obtener_trabajo))
        .route("/trabajo/:id", put(actualizar_trabajo))
        .route("/trabajo/:id", delete(eliminar_trabajo))
        .route("/trabajo/:id/gastos", get(gastos_trabajo))
        .route("/:id/mecanicos", put(asignar_mecanicos))
        .route("/:id/mecanicos", get(mecanicos_asignados))
}

async fn crear_trabajo(
    State(state): State<AppState>,
    Json(request): Json<CreateTrabajoRequest>,
) -> Result<Json<CrearTrabajoResponse>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_trabajos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrabajoResponse>>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.listar().await?;
    Ok(Json(response))
}

async fn obtener_trabajo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TrabajoDetalleResponse>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn actualizar_trabajo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTrabajoRequest>,
) -> Result<Json<ActualizarTrabajoResponse>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.actualizar(id, request).await?;
    Ok(Json(response))
}

async fn eliminar_trabajo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let mensaje = controller.eliminar(id).await?;
    Ok(Json(serde_json::json!({ "message": mensaje })))
}

async fn gastos_trabajo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<DetalleGastoResponse>>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.gastos(id).await?;
    Ok(Json(response))
}

async fn asignar_mecanicos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<AsignarMecanicosRequest>,
) -> Result<Json<Vec<AsignacionMecanicoResponse>>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.asignar_mecanicos(id, request).await?;
    Ok(Json(response))
}

async fn mecanicos_asignados(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<MecanicoAsignadoResponse>>, AppError> {
    let controller = TrabajoController::new(state.pool.clone());
    let response = controller.mecanicos_asignados(id).await?;
    Ok(Json(response))
}

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use crate::controllers::comision_controller::ComisionController;
use crate::controllers::mecanico_controller::MecanicoController;
use crate::dto::comision_dto::{ComisionQuincenaItem, LiquidarQuincenaRequest, LiquidarQuincenaResponse};
use crate::dto::mecanico_dto::{
    ApiResponse, BuscarMecanicosQuery, CreateMecanicoRequest, EstadisticasQuery,
    ListarMecanicosQuery, MecanicoConEstadisticasResponse, MecanicoResponse,
    UpdateMecanicoRequest,
};
use crate::dto::trabajo_dto::TrabajoMecanicoItem;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_mecanico_router() -> Router<AppState> {
    Router::new()
        .route("/", post(crear_mecanico))
        .route("/", get(listar_mecanicos))
        .route("/buscar", get(buscar_mecanicos))
        .route("/reporte/mensual/:mes", get(reporte_mensual))
        .route("/:id", get(obtener_mecanico))
        .route("/:id", put(actualizar_mecanico))
        .route("/:id", delete(eliminar_mecanico))
        .route("/:id/estadisticas", get(estadisticas_mecanico))
        .route("/:id/trabajos", get(trabajos_mecanico))
        .route("/:id/comisiones/quincena/:quincena", get(comisiones_quincena_mecanico))
        .route("/:id/comisiones/quincena/:quincena/estado", post(liquidar_quincena_mecanico))
}

async fn crear_mecanico(
    State(state): State<AppState>,
    Json(request): Json<CreateMecanicoRequest>,
) -> Result<Json<ApiResponse<MecanicoResponse>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.crear(request).await?;
    Ok(Json(response))
}

async fn listar_mecanicos(
    State(state): State<AppState>,
    Query(query): Query<ListarMecanicosQuery>,
) -> Result<Json<Vec<MecanicoResponse>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.listar(query).await?;
    Ok(Json(response))
}

async fn buscar_mecanicos(
    State(state): State<AppState>,
    Query(query): Query<BuscarMecanicosQuery>,
) -> Result<Json<Vec<MecanicoResponse>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.buscar(query).await?;
    Ok(Json(response))
}

async fn obtener_mecanico(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MecanicoResponse>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.obtener(id).await?;
    Ok(Json(response))
}

async fn actualizar_mecanico(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateMecanicoRequest>,
) -> Result<Json<ApiResponse<MecanicoResponse>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.actualizar(id, request).await?;
    Ok(Json(response))
}

async fn eliminar_mecanico(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let mensaje = controller.eliminar(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": mensaje
    })))
}

async fn estadisticas_mecanico(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<EstadisticasQuery>,
) -> Result<Json<MecanicoConEstadisticasResponse>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.estadisticas(id, query).await?;
    Ok(Json(response))
}

async fn reporte_mensual(
    State(state): State<AppState>,
    Path(mes): Path<String>,
) -> Result<Json<Vec<MecanicoConEstadisticasResponse>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.reporte_mensual(&mes).await?;
    Ok(Json(response))
}

async fn trabajos_mecanico(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<TrabajoMecanicoItem>>, AppError> {
    let controller = MecanicoController::new(state.pool.clone());
    let response = controller.trabajos(id).await?;
    Ok(Json(response))
}

async fn comisiones_quincena_mecanico(
    State(state): State<AppState>,
    Path((id, quincena)): Path<(i32, String)>,
) -> Result<Json<Vec<ComisionQuincenaItem>>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.comisiones_de_mecanico(id, &quincena).await?;
    Ok(Json(response))
}

async fn liquidar_quincena_mecanico(
    State(state): State<AppState>,
    Path((id, quincena)): Path<(i32, String)>,
    Json(request): Json<LiquidarQuincenaRequest>,
) -> Result<Json<LiquidarQuincenaResponse>, AppError> {
    let controller = ComisionController::new(state.pool.clone());
    let response = controller.liquidar(id, &quincena, request).await?;
    Ok(Json(response))
}

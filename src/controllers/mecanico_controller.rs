use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::mecanico_dto::{
    ApiResponse, BuscarMecanicosQuery, CreateMecanicoRequest, EstadisticasQuery,
    ListarMecanicosQuery, MecanicoConEstadisticasResponse, MecanicoResponse,
    UpdateMecanicoRequest,
};
use crate::dto::trabajo_dto::TrabajoMecanicoItem;
use crate::models::mecanico::Mecanico;
use crate::models::quincena::Quincena;
use crate::repositories::{ComisionRepository, MecanicoRepository};
use crate::services::comision_service::PORCENTAJE_COMISION_DEFAULT;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppError};
use crate::utils::validation::{field_errors, validate_range};

pub struct MecanicoController {
    mecanicos: MecanicoRepository,
    comisiones: ComisionRepository,
}

impl MecanicoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            mecanicos: MecanicoRepository::new(pool.clone()),
            comisiones: ComisionRepository::new(pool),
        }
    }

    pub async fn crear(
        &self,
        request: CreateMecanicoRequest,
    ) -> Result<ApiResponse<MecanicoResponse>, AppError> {
        request.validate()?;
        if let Some(pct) = request.porcentaje_comision {
            Self::validar_porcentaje(pct)?;
        }

        // El id nacional identifica al mecánico frente al taller; no se repite
        if self.mecanicos.existe_id_nacional(&request.id_nacional).await? {
            return Err(conflict_error("Mecánico", "id_nacional", &request.id_nacional));
        }

        let mecanico = self
            .mecanicos
            .crear(
                &request.id_nacional,
                &request.nombre,
                request.correo.as_deref(),
                request.telefono.as_deref(),
                request.porcentaje_comision.unwrap_or(*PORCENTAJE_COMISION_DEFAULT),
            )
            .await?;

        log::info!("👷 Mecánico '{}' registrado (id {})", mecanico.nombre, mecanico.id);

        Ok(ApiResponse::success_with_message(
            mecanico.into(),
            "Mecánico registrado exitosamente".to_string(),
        ))
    }

    pub async fn listar(
        &self,
        query: ListarMecanicosQuery,
    ) -> Result<Vec<MecanicoResponse>, AppError> {
        let skip = query.skip.unwrap_or(0).max(0);
        let limit = query.limit.unwrap_or(100).clamp(1, 500);

        let mecanicos = self.mecanicos.listar(query.activo, skip, limit).await?;
        Ok(mecanicos.into_iter().map(MecanicoResponse::from).collect())
    }

    pub async fn buscar(
        &self,
        query: BuscarMecanicosQuery,
    ) -> Result<Vec<MecanicoResponse>, AppError> {
        let termino = query.q.trim();
        if termino.is_empty() {
            return Err(bad_request_error("El término de búsqueda no puede estar vacío"));
        }
        let limit = query.limit.unwrap_or(10).clamp(1, 100);

        let mecanicos = self.mecanicos.buscar(termino, limit).await?;
        Ok(mecanicos.into_iter().map(MecanicoResponse::from).collect())
    }

    pub async fn obtener(&self, id: i32) -> Result<MecanicoResponse, AppError> {
        let mecanico = self.buscar_mecanico(id).await?;
        Ok(mecanico.into())
    }

    pub async fn actualizar(
        &self,
        id: i32,
        request: UpdateMecanicoRequest,
    ) -> Result<ApiResponse<MecanicoResponse>, AppError> {
        request.validate()?;
        if let Some(pct) = request.porcentaje_comision {
            Self::validar_porcentaje(pct)?;
        }

        let actual = self.buscar_mecanico(id).await?;
        let mecanico = self
            .mecanicos
            .actualizar(
                actual,
                request.nombre,
                request.correo,
                request.telefono,
                request.porcentaje_comision,
                request.activo,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            mecanico.into(),
            "Mecánico actualizado exitosamente".to_string(),
        ))
    }

    /// Baja de un mecánico: si tiene historial de comisiones se desactiva
    /// para conservar la auditoría; si no tiene, se elimina de verdad
    pub async fn eliminar(&self, id: i32) -> Result<String, AppError> {
        let mecanico = self.buscar_mecanico(id).await?;

        if self.mecanicos.tiene_comisiones(id).await? {
            self.mecanicos.desactivar(id).await?;
            log::info!("🚫 Mecánico '{}' desactivado (conserva historial)", mecanico.nombre);
            Ok(format!(
                "Mecánico '{}' desactivado; conserva su historial de comisiones",
                mecanico.nombre
            ))
        } else {
            self.mecanicos.eliminar(id).await?;
            log::info!("🗑️ Mecánico '{}' eliminado", mecanico.nombre);
            Ok(format!("Mecánico '{}' eliminado", mecanico.nombre))
        }
    }

    pub async fn estadisticas(
        &self,
        id: i32,
        query: EstadisticasQuery,
    ) -> Result<MecanicoConEstadisticasResponse, AppError> {
        if let Some(mes) = query.mes.as_deref() {
            Self::validar_mes(mes)?;
        }
        if let Some(quincena) = query.quincena.as_deref() {
            quincena.parse::<Quincena>()?;
        }

        let mecanico = self.buscar_mecanico(id).await?;
        let (trabajos, ganancias, comisiones) = self
            .comisiones
            .estadisticas_de_mecanico(
                id,
                query.mes.as_deref(),
                query.quincena.as_deref(),
                query.estado,
            )
            .await?;

        Ok(MecanicoConEstadisticasResponse::nuevo(
            mecanico, trabajos, ganancias, comisiones,
        ))
    }

    /// Estadísticas del mes para todos los mecánicos activos
    pub async fn reporte_mensual(
        &self,
        mes: &str,
    ) -> Result<Vec<MecanicoConEstadisticasResponse>, AppError> {
        Self::validar_mes(mes)?;

        let activos = self.mecanicos.listar_activos().await?;
        let mut reporte = Vec::with_capacity(activos.len());

        for mecanico in activos {
            let (trabajos, ganancias, comisiones) = self
                .comisiones
                .estadisticas_de_mecanico(mecanico.id, Some(mes), None, None)
                .await?;
            reporte.push(MecanicoConEstadisticasResponse::nuevo(
                mecanico, trabajos, ganancias, comisiones,
            ));
        }

        Ok(reporte)
    }

    /// Historial de trabajos del mecánico con su comisión en cada uno
    pub async fn trabajos(&self, id: i32) -> Result<Vec<TrabajoMecanicoItem>, AppError> {
        self.buscar_mecanico(id).await?;

        let filas = self.comisiones.trabajos_de_mecanico(id).await?;
        Ok(filas.into_iter().map(TrabajoMecanicoItem::from).collect())
    }

    async fn buscar_mecanico(&self, id: i32) -> Result<Mecanico, AppError> {
        self.mecanicos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| not_found_error("Mecánico", id))
    }

    fn validar_porcentaje(pct: Decimal) -> Result<(), AppError> {
        validate_range(pct, Decimal::ZERO, Decimal::ONE_HUNDRED)
            .map_err(|e| AppError::Validation(field_errors("porcentaje_comision", e)))
    }

    fn validar_mes(mes: &str) -> Result<(), AppError> {
        let como_fecha = format!("{}-01", mes);
        if chrono::NaiveDate::parse_from_str(&como_fecha, "%Y-%m-%d").is_err() {
            return Err(bad_request_error("Formato de mes inválido. Use: YYYY-MM"));
        }
        Ok(())
    }
}

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::trabajo_dto::{
    ActualizarTrabajoResponse, AsignacionMecanicoResponse, AsignarMecanicosRequest,
    CreateTrabajoRequest, CrearTrabajoResponse, DetalleGastoRequest, DetalleGastoResponse,
    MecanicoAsignadoResponse, TrabajoDetalleResponse, TrabajoResponse, UpdateTrabajoRequest,
};
use crate::models::trabajo::{MecanicoAsignado, NuevoGasto, Trabajo};
use crate::repositories::{ComisionRepository, TrabajoRepository};
use crate::services::asignacion_service::AsignacionService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{field_errors, validate_date, validate_non_negative};

pub struct TrabajoController {
    trabajos: TrabajoRepository,
    comisiones: ComisionRepository,
    pool: PgPool,
}

impl TrabajoController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trabajos: TrabajoRepository::new(pool.clone()),
            comisiones: ComisionRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn crear(
        &self,
        request: CreateTrabajoRequest,
    ) -> Result<CrearTrabajoResponse, AppError> {
        request.validate()?;
        Self::validar_montos(request.costo, &request.detalle_gastos)?;

        let fecha = Self::parsear_fecha(&request.fecha, "fecha")?;
        let fecha_registro = match request.fecha_registro.as_deref() {
            Some(valor) => Self::parsear_fecha(valor, "fecha_registro")?,
            None => fecha,
        };

        let mano_obra = request.mano_obra.unwrap_or(Decimal::ZERO);
        let markup_repuestos = request.markup_repuestos.unwrap_or(Decimal::ZERO);
        let total_gastos: Decimal = request.detalle_gastos.iter().map(|g| g.monto).sum();
        let ganancia = Self::ganancia_neta(mano_obra, markup_repuestos, total_gastos);

        let gastos = Self::gastos_nuevos(&request.detalle_gastos);
        let trabajo = self
            .trabajos
            .crear(
                &request.matricula_carro,
                &request.descripcion,
                fecha,
                fecha_registro,
                request.costo,
                mano_obra,
                markup_repuestos,
                ganancia,
                request.aplica_iva.unwrap_or(false),
                &gastos,
            )
            .await?;

        log::info!(
            "🔩 Trabajo {} creado ({} gastos, ganancia {})",
            trabajo.id,
            gastos.len(),
            trabajo.ganancia
        );

        Ok(CrearTrabajoResponse {
            message: "Trabajo creado con sus gastos correctamente".to_string(),
            id: trabajo.id,
            ganancia_calculada: trabajo.ganancia,
        })
    }

    /// Listado con totales de gastos, ganancia base de comisiones y
    /// mecánicos asignados
    pub async fn listar(&self) -> Result<Vec<TrabajoResponse>, AppError> {
        let trabajos = self.trabajos.listar_con_totales().await?;
        let asignados = self.trabajos.mecanicos_asignados().await?;

        let mut por_trabajo: HashMap<i32, Vec<MecanicoAsignado>> = HashMap::new();
        for asignado in asignados {
            por_trabajo.entry(asignado.id_trabajo).or_default().push(asignado);
        }

        Ok(trabajos
            .into_iter()
            .map(|trabajo| {
                let del_trabajo = por_trabajo.remove(&trabajo.id).unwrap_or_default();
                TrabajoResponse::nuevo(trabajo, &del_trabajo)
            })
            .collect())
    }

    pub async fn obtener(&self, id: i32) -> Result<TrabajoDetalleResponse, AppError> {
        let trabajo = self.buscar_trabajo(id).await?;
        let gastos = self.trabajos.gastos_de_trabajo(id).await?;

        Ok(TrabajoDetalleResponse {
            id: trabajo.id,
            matricula_carro: trabajo.matricula_carro,
            descripcion: trabajo.descripcion,
            fecha: trabajo.fecha.format("%Y-%m-%d").to_string(),
            fecha_registro: trabajo.fecha_registro.format("%Y-%m-%d").to_string(),
            costo: trabajo.costo,
            mano_obra: trabajo.mano_obra,
            markup_repuestos: trabajo.markup_repuestos,
            ganancia: trabajo.ganancia,
            aplica_iva: trabajo.aplica_iva,
            gastos: gastos.into_iter().map(DetalleGastoResponse::from).collect(),
        })
    }

    /// Reemplaza los datos y gastos del trabajo. Las asignaciones de
    /// mecánicos no se tocan: la reconciliación es un paso aparte
    pub async fn actualizar(
        &self,
        id: i32,
        request: UpdateTrabajoRequest,
    ) -> Result<ActualizarTrabajoResponse, AppError> {
        request.validate()?;
        Self::validar_montos(request.costo, &request.detalle_gastos)?;
        self.buscar_trabajo(id).await?;

        let mano_obra = request.mano_obra.unwrap_or(Decimal::ZERO);
        let markup_repuestos = request.markup_repuestos.unwrap_or(Decimal::ZERO);
        let total_gastos: Decimal = request.detalle_gastos.iter().map(|g| g.monto).sum();
        let ganancia = Self::ganancia_neta(mano_obra, markup_repuestos, total_gastos);

        let gastos = Self::gastos_nuevos(&request.detalle_gastos);
        let trabajo = self
            .trabajos
            .actualizar(
                id,
                &request.descripcion,
                request.costo,
                mano_obra,
                markup_repuestos,
                ganancia,
                request.aplica_iva.unwrap_or(false),
                &gastos,
            )
            .await?;

        Ok(ActualizarTrabajoResponse {
            message: "Trabajo actualizado correctamente".to_string(),
            ganancia_calculada: trabajo.ganancia,
        })
    }

    pub async fn eliminar(&self, id: i32) -> Result<String, AppError> {
        let borrado = self.trabajos.eliminar(id).await?;
        if !borrado {
            return Err(not_found_error("Trabajo", id));
        }

        log::info!("🗑️ Trabajo {} eliminado con sus gastos y comisiones", id);
        Ok("Trabajo eliminado correctamente".to_string())
    }

    pub async fn gastos(&self, id: i32) -> Result<Vec<DetalleGastoResponse>, AppError> {
        self.buscar_trabajo(id).await?;
        let gastos = self.trabajos.gastos_de_trabajo(id).await?;
        Ok(gastos.into_iter().map(DetalleGastoResponse::from).collect())
    }

    /// Reconcilia el conjunto de mecánicos asignados al trabajo
    pub async fn asignar_mecanicos(
        &self,
        id: i32,
        request: AsignarMecanicosRequest,
    ) -> Result<Vec<AsignacionMecanicoResponse>, AppError> {
        let filas =
            AsignacionService::reconciliar(&self.pool, id, &request.mecanicos, request.porcentaje)
                .await?;

        Ok(filas.iter().map(AsignacionMecanicoResponse::from).collect())
    }

    pub async fn mecanicos_asignados(
        &self,
        id: i32,
    ) -> Result<Vec<MecanicoAsignadoResponse>, AppError> {
        self.buscar_trabajo(id).await?;

        let filas = self.comisiones.asignaciones_de_trabajo(id).await?;
        Ok(filas.iter().map(MecanicoAsignadoResponse::from).collect())
    }

    async fn buscar_trabajo(&self, id: i32) -> Result<Trabajo, AppError> {
        self.trabajos
            .buscar_por_id(id)
            .await?
            .ok_or_else(|| not_found_error("Trabajo", id))
    }

    /// Ganancia neta almacenada del trabajo: mano de obra más markup de
    /// repuestos menos gastos reales, nunca negativa. Distinta de la base
    /// de comisiones, que no incluye el markup
    fn ganancia_neta(
        mano_obra: Decimal,
        markup_repuestos: Decimal,
        gastos_reales: Decimal,
    ) -> Decimal {
        (mano_obra + markup_repuestos - gastos_reales).max(Decimal::ZERO)
    }

    fn gastos_nuevos(detalle: &[DetalleGastoRequest]) -> Vec<NuevoGasto> {
        detalle
            .iter()
            .map(|g| NuevoGasto {
                descripcion: g.descripcion.clone(),
                monto: g.monto,
                monto_cobrado: g.monto_cobrado,
            })
            .collect()
    }

    fn validar_montos(
        costo: Decimal,
        detalle: &[DetalleGastoRequest],
    ) -> Result<(), AppError> {
        validate_non_negative(costo)
            .map_err(|e| AppError::Validation(field_errors("costo", e)))?;
        for gasto in detalle {
            validate_non_negative(gasto.monto)
                .map_err(|e| AppError::Validation(field_errors("detalle_gastos", e)))?;
        }
        Ok(())
    }

    fn parsear_fecha(valor: &str, campo: &'static str) -> Result<DateTime<Utc>, AppError> {
        let fecha: NaiveDate =
            validate_date(valor).map_err(|e| AppError::Validation(field_errors(campo, e)))?;
        Ok(Utc.from_utc_datetime(&fecha.and_time(NaiveTime::MIN)))
    }
}

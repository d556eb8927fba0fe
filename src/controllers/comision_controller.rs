use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::comision_dto::{
    CambiarEstadoRequest, CambiarEstadoResponse, ComisionQuincenaItem, ComisionResumenItem,
    ComisionesQuincenaResponse, GenerarQuincenaResponse, LiquidarQuincenaRequest,
    LiquidarQuincenaResponse, ReporteFinancieroResponse, ResumenFinanciero,
};
use crate::models::comision::{ComisionMecanico, EstadoComision};
use crate::models::quincena::Quincena;
use crate::repositories::{ComisionRepository, MecanicoRepository};
use crate::services::liquidacion_service::LiquidacionService;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct ComisionController {
    comisiones: ComisionRepository,
    mecanicos: MecanicoRepository,
    pool: PgPool,
}

impl ComisionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            comisiones: ComisionRepository::new(pool.clone()),
            mecanicos: MecanicoRepository::new(pool.clone()),
            pool,
        }
    }

    /// Cierre de quincena: estampa la etiqueta sobre las comisiones
    /// pendientes del rango que todavía no la tienen
    pub async fn generar_quincena(
        &self,
        quincena: &str,
    ) -> Result<GenerarQuincenaResponse, AppError> {
        let quincena: Quincena = quincena.parse()?;
        let actualizadas = LiquidacionService::generar_quincena(&self.pool, &quincena).await?;
        let (inicio, fin) = quincena.limites();

        Ok(GenerarQuincenaResponse {
            message: format!("Estados de comisiones generados para quincena {}", quincena),
            quincena: quincena.to_string(),
            fecha_inicio: inicio.format("%Y-%m-%d").to_string(),
            fecha_fin: fin.format("%Y-%m-%d").to_string(),
            comisiones_actualizadas: actualizadas,
        })
    }

    pub async fn comisiones_de_quincena(
        &self,
        quincena: &str,
    ) -> Result<ComisionesQuincenaResponse, AppError> {
        let quincena: Quincena = quincena.parse()?;
        let filas = self.comisiones.comisiones_de_quincena(&quincena).await?;

        Ok(ComisionesQuincenaResponse::nueva(&quincena, &filas))
    }

    /// Comisiones de un mecánico en una quincena (la lectura de la pantalla
    /// de liquidación)
    pub async fn comisiones_de_mecanico(
        &self,
        id_mecanico: i32,
        quincena: &str,
    ) -> Result<Vec<ComisionQuincenaItem>, AppError> {
        let quincena: Quincena = quincena.parse()?;

        if self.mecanicos.buscar_por_id(id_mecanico).await?.is_none() {
            return Err(not_found_error("Mecánico", id_mecanico));
        }

        let filas = self
            .comisiones
            .comisiones_de_mecanico_quincena(id_mecanico, &quincena)
            .await?;
        Ok(filas.iter().map(ComisionQuincenaItem::from).collect())
    }

    /// Aprueba o deniega en bloque las pendientes del mecánico en la quincena
    pub async fn liquidar(
        &self,
        id_mecanico: i32,
        quincena: &str,
        request: LiquidarQuincenaRequest,
    ) -> Result<LiquidarQuincenaResponse, AppError> {
        let quincena: Quincena = quincena.parse()?;

        let resultado =
            LiquidacionService::liquidar_quincena(&self.pool, id_mecanico, &quincena, request.aprobar)
                .await?;

        let message = if request.aprobar {
            format!("Comisiones de la quincena {} aprobadas", quincena)
        } else {
            format!("Comisiones de la quincena {} denegadas", quincena)
        };

        Ok(LiquidarQuincenaResponse {
            message,
            id_mecanico,
            quincena: quincena.to_string(),
            nuevo_estado: resultado.nuevo_estado,
            comisiones_actualizadas: resultado.comisiones_actualizadas,
            monto_total: resultado.monto_total,
        })
    }

    /// Cambio manual de estado de una comisión (p. ej. PENALIZADA)
    pub async fn cambiar_estado(
        &self,
        id_comision: i32,
        request: CambiarEstadoRequest,
    ) -> Result<CambiarEstadoResponse, AppError> {
        if request.estado == EstadoComision::Pendiente {
            return Err(bad_request_error(
                "Estado inválido. Use: APROBADA, PENALIZADA o DENEGADA",
            ));
        }

        let comision =
            LiquidacionService::cambiar_estado(&self.pool, id_comision, request.estado).await?;

        Ok(CambiarEstadoResponse {
            message: format!("Estado de comisión cambiado a {}", comision.estado_comision),
            id_comision: comision.id,
            nuevo_estado: comision.estado_comision,
        })
    }

    /// Reporte financiero de la quincena: filas estampadas partidas por
    /// estado, con sus totales
    pub async fn reporte_financiero(
        &self,
        quincena: &str,
    ) -> Result<ReporteFinancieroResponse, AppError> {
        let quincena: Quincena = quincena.parse()?;
        let filas = self.comisiones.filas_de_quincena(&quincena).await?;

        let aprobadas = Self::filtrar(&filas, EstadoComision::Aprobada);
        let penalizadas = Self::filtrar(&filas, EstadoComision::Penalizada);
        let pendientes = Self::filtrar(&filas, EstadoComision::Pendiente);
        let denegadas = Self::filtrar(&filas, EstadoComision::Denegada);

        let resumen = ResumenFinanciero {
            total_comisiones_aprobadas: aprobadas.len(),
            total_gastos_comisiones: Self::sumar(&aprobadas),
            total_comisiones_penalizadas: penalizadas.len(),
            total_ahorro_penalizaciones: Self::sumar(&penalizadas),
            total_comisiones_pendientes: pendientes.len(),
            total_pendiente: Self::sumar(&pendientes),
            total_comisiones_denegadas: denegadas.len(),
            // Las denegadas quedan con monto en cero; la suma es la constancia
            total_denegadas: Self::sumar(&denegadas),
        };

        Ok(ReporteFinancieroResponse {
            quincena: quincena.to_string(),
            resumen,
            comisiones_aprobadas: aprobadas.iter().copied().map(ComisionResumenItem::from).collect(),
            comisiones_penalizadas: penalizadas.iter().copied().map(ComisionResumenItem::from).collect(),
            comisiones_denegadas: denegadas.iter().copied().map(ComisionResumenItem::from).collect(),
        })
    }

    fn filtrar(filas: &[ComisionMecanico], estado: EstadoComision) -> Vec<&ComisionMecanico> {
        filas.iter().filter(|f| f.estado_comision == estado).collect()
    }

    fn sumar(filas: &[&ComisionMecanico]) -> Decimal {
        filas.iter().map(|f| f.monto_comision).sum()
    }
}

//! Servicio de liquidación de comisiones
//!
//! Cierra quincenas y mueve las comisiones por su ciclo de aprobación:
//! estampado de quincena sobre filas pendientes, liquidación por mecánico
//! (aprobar o denegar en bloque) y cambio manual de estado de una fila.
//! Cada operación es una transacción; o se resuelven todas las filas del
//! lote o ninguna.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::comision::{ComisionMecanico, EstadoComision};
use crate::models::quincena::Quincena;
use crate::repositories::{ComisionRepository, MecanicoRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Resultado de liquidar la quincena de un mecánico
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultadoLiquidacion {
    pub nuevo_estado: EstadoComision,
    pub comisiones_actualizadas: u64,
    /// Suma de montos antes de liquidar; al denegar es lo que se dejó de pagar
    pub monto_total: Decimal,
}

pub struct LiquidacionService;

impl LiquidacionService {
    /// Estampa la etiqueta de quincena sobre las filas sin estampar cuyo
    /// cálculo cae en el rango. Re-ejecutarla es inocuo: solo toca filas
    /// que siguen sin quincena
    pub async fn generar_quincena(pool: &PgPool, quincena: &Quincena) -> AppResult<u64> {
        let mut tx = pool.begin().await?;
        let actualizadas = ComisionRepository::estampar_quincena(&mut *tx, quincena).await?;
        tx.commit().await?;

        log::info!(
            "📅 Quincena {} generada: {} comisiones estampadas",
            quincena,
            actualizadas
        );
        Ok(actualizadas)
    }

    /// Aprueba o deniega en bloque las comisiones pendientes de un mecánico
    /// en una quincena.
    ///
    /// Se prefieren las filas ya estampadas con la etiqueta; si no hay,
    /// se recurre a las pendientes sin estampar cuyo trabajo cae en el rango
    /// (la liquidación no depende de haber corrido el cierre antes).
    /// Al denegar, las filas se conservan con monto en cero.
    pub async fn liquidar_quincena(
        pool: &PgPool,
        id_mecanico: i32,
        quincena: &Quincena,
        aprobar: bool,
    ) -> AppResult<ResultadoLiquidacion> {
        let mecanico = MecanicoRepository::new(pool.clone())
            .buscar_por_id(id_mecanico)
            .await?
            .ok_or_else(|| not_found_error("Mecánico", id_mecanico))?;

        let mut tx = pool.begin().await?;

        let mut candidatas =
            ComisionRepository::pendientes_estampadas(&mut *tx, id_mecanico, quincena).await?;
        if candidatas.is_empty() {
            candidatas = ComisionRepository::pendientes_sin_estampar_por_fecha_trabajo(
                &mut *tx,
                id_mecanico,
                quincena,
            )
            .await?;
        }

        if candidatas.is_empty() {
            return Err(AppError::NothingToSettle(format!(
                "El mecánico '{}' no tiene comisiones pendientes en la quincena {}",
                mecanico.nombre, quincena
            )));
        }

        let ids: Vec<i32> = candidatas.iter().map(|c| c.id).collect();
        let monto_total: Decimal = candidatas.iter().map(|c| c.monto_comision).sum();

        let (comisiones_actualizadas, nuevo_estado) = if aprobar {
            let n = ComisionRepository::aprobar_filas(&mut *tx, &ids, quincena).await?;
            (n, EstadoComision::Aprobada)
        } else {
            let n = ComisionRepository::denegar_filas(&mut *tx, &ids, quincena).await?;
            (n, EstadoComision::Denegada)
        };

        tx.commit().await?;

        log::info!(
            "💰 Quincena {} del mecánico '{}' liquidada: {} comisiones {}, monto {}",
            quincena,
            mecanico.nombre,
            comisiones_actualizadas,
            nuevo_estado,
            monto_total
        );

        Ok(ResultadoLiquidacion {
            nuevo_estado,
            comisiones_actualizadas,
            monto_total,
        })
    }

    /// Cambio manual de estado de una sola comisión (vía PENALIZADA incluida).
    /// Solo las pendientes admiten transición; denegar deja el monto en cero
    pub async fn cambiar_estado(
        pool: &PgPool,
        id_comision: i32,
        nuevo_estado: EstadoComision,
    ) -> AppResult<ComisionMecanico> {
        let mut tx = pool.begin().await?;

        let comision = ComisionRepository::bloquear_por_id(&mut *tx, id_comision)
            .await?
            .ok_or_else(|| not_found_error("Comisión", id_comision))?;

        if !comision.estado_comision.puede_transicionar_a(nuevo_estado) {
            return Err(AppError::Conflict(format!(
                "La comisión {} está {} y ya no admite cambios de estado",
                id_comision, comision.estado_comision
            )));
        }

        let monto = if nuevo_estado == EstadoComision::Denegada {
            Some(Decimal::ZERO)
        } else {
            None
        };

        let actualizada =
            ComisionRepository::cambiar_estado(&mut *tx, id_comision, nuevo_estado, monto).await?;
        tx.commit().await?;

        log::info!(
            "🔁 Comisión {} cambiada a {} (monto {})",
            actualizada.id,
            actualizada.estado_comision,
            actualizada.monto_comision
        );

        Ok(actualizada)
    }
}

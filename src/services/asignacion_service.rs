//! Servicio de reconciliación de asignaciones
//!
//! Mantiene en sincronía el conjunto de mecánicos asignados a un trabajo con
//! sus filas de comisión. El conjunto deseado se compara contra el actual y
//! solo se tocan las filas afectadas; todo ocurre dentro de una transacción
//! con las filas del trabajo bloqueadas.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::comision::{ComisionDetallada, NuevaComision};
use crate::repositories::{ComisionRepository, MecanicoRepository, TrabajoRepository};
use crate::services::comision_service::{ComisionService, PORCENTAJE_COMISION_DEFAULT};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Partición del conjunto deseado frente a las asignaciones actuales
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReconciliacion {
    /// Ya asignados que siguen: se recalculan en sitio
    pub mantener: Vec<i32>,
    /// Nuevos en el conjunto deseado: se insertan
    pub crear: Vec<i32>,
    /// Asignados que salen del conjunto: se eliminan
    pub eliminar: Vec<i32>,
}

impl PlanReconciliacion {
    pub fn planificar(actuales: &[i32], deseados: &[i32]) -> Self {
        let actuales_set: HashSet<i32> = actuales.iter().copied().collect();
        let deseados_set: HashSet<i32> = deseados.iter().copied().collect();

        Self {
            mantener: deseados
                .iter()
                .copied()
                .filter(|id| actuales_set.contains(id))
                .collect(),
            crear: deseados
                .iter()
                .copied()
                .filter(|id| !actuales_set.contains(id))
                .collect(),
            eliminar: actuales
                .iter()
                .copied()
                .filter(|id| !deseados_set.contains(id))
                .collect(),
        }
    }

    pub fn sin_cambios_de_conjunto(&self) -> bool {
        self.crear.is_empty() && self.eliminar.is_empty()
    }
}

pub struct AsignacionService;

impl AsignacionService {
    /// Reconcilia las asignaciones de un trabajo con el conjunto deseado.
    ///
    /// Los montos se recalculan siempre a partir del estado actual del
    /// trabajo, así que repetir la llamada con el mismo conjunto deja la
    /// base igual. Un conjunto vacío elimina todas las asignaciones.
    pub async fn reconciliar(
        pool: &PgPool,
        id_trabajo: i32,
        deseados: &[i32],
        porcentaje: Option<Decimal>,
    ) -> AppResult<Vec<ComisionDetallada>> {
        Self::validar_sin_duplicados(deseados)?;

        let mut tx = pool.begin().await?;

        let trabajo = TrabajoRepository::bloquear_por_id(&mut *tx, id_trabajo)
            .await?
            .ok_or_else(|| not_found_error("Trabajo", id_trabajo))?;

        // Todo mecánico deseado debe existir y estar activo
        let mecanicos = MecanicoRepository::buscar_por_ids(&mut *tx, deseados).await?;
        let por_id: HashMap<i32, _> = mecanicos.iter().map(|m| (m.id, m)).collect();
        for id in deseados {
            let mecanico = por_id
                .get(id)
                .ok_or_else(|| not_found_error("Mecánico", id))?;
            if !mecanico.activo {
                return Err(bad_request_error(&format!(
                    "El mecánico '{}' (id {}) está inactivo y no puede ser asignado",
                    mecanico.nombre, mecanico.id
                )));
            }
        }

        let actuales = ComisionRepository::por_trabajo_bloqueadas(&mut *tx, id_trabajo).await?;

        // Una comisión ya resuelta no se recalcula ni se elimina
        if let Some(resuelta) = actuales.iter().find(|f| !f.estado_comision.es_pendiente()) {
            return Err(AppError::Conflict(format!(
                "El trabajo {} tiene comisiones ya resueltas ({} del mecánico {}); \
                 no se pueden modificar sus asignaciones",
                id_trabajo, resuelta.estado_comision, resuelta.id_mecanico
            )));
        }

        let actuales_ids: Vec<i32> = actuales.iter().map(|f| f.id_mecanico).collect();
        let plan = PlanReconciliacion::planificar(&actuales_ids, deseados);

        if deseados.is_empty() {
            if !actuales_ids.is_empty() {
                ComisionRepository::eliminar_por_mecanicos(&mut *tx, id_trabajo, &actuales_ids)
                    .await?;
            }
            tx.commit().await?;

            log::info!(
                "🧹 Trabajo {}: asignaciones eliminadas ({} mecánicos)",
                id_trabajo,
                actuales_ids.len()
            );
            return Ok(Vec::new());
        }

        let gastos_reales = TrabajoRepository::total_gastos(&mut *tx, id_trabajo).await?;
        let pct = porcentaje.unwrap_or(*PORCENTAJE_COMISION_DEFAULT);
        let calculo =
            ComisionService::calcular(trabajo.mano_obra, gastos_reales, pct, deseados.len())?;
        let mes_reporte = Utc::now().format("%Y-%m").to_string();

        let filas_por_mecanico: HashMap<i32, _> =
            actuales.iter().map(|f| (f.id_mecanico, f)).collect();

        for id_mecanico in &plan.mantener {
            if let Some(fila) = filas_por_mecanico.get(id_mecanico) {
                ComisionRepository::recomputar(
                    &mut *tx,
                    fila.id,
                    calculo.ganancia_base,
                    pct,
                    calculo.comision_por_mecanico,
                    &mes_reporte,
                )
                .await?;
            }
        }

        for id_mecanico in &plan.crear {
            let nueva = NuevaComision {
                id_trabajo,
                id_mecanico: *id_mecanico,
                ganancia_trabajo: calculo.ganancia_base,
                porcentaje_comision: pct,
                monto_comision: calculo.comision_por_mecanico,
            };
            ComisionRepository::insertar(&mut *tx, &nueva, &mes_reporte).await?;
        }

        if !plan.eliminar.is_empty() {
            ComisionRepository::eliminar_por_mecanicos(&mut *tx, id_trabajo, &plan.eliminar)
                .await?;
        }

        tx.commit().await?;

        log::info!(
            "🔧 Trabajo {}: asignaciones reconciliadas ({} mantenidas, {} nuevas, {} eliminadas, comisión {} por mecánico)",
            id_trabajo,
            plan.mantener.len(),
            plan.crear.len(),
            plan.eliminar.len(),
            calculo.comision_por_mecanico
        );

        ComisionRepository::new(pool.clone())
            .asignaciones_de_trabajo(id_trabajo)
            .await
    }

    fn validar_sin_duplicados(deseados: &[i32]) -> AppResult<()> {
        let mut vistos = HashSet::new();
        for id in deseados {
            if !vistos.insert(*id) {
                return Err(bad_request_error(&format!(
                    "El mecánico {} aparece más de una vez en la lista",
                    id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planificar_reemplazo_parcial() {
        // [1, 2] -> [2, 3]: se mantiene 2, entra 3, sale 1
        let plan = PlanReconciliacion::planificar(&[1, 2], &[2, 3]);

        assert_eq!(plan.mantener, vec![2]);
        assert_eq!(plan.crear, vec![3]);
        assert_eq!(plan.eliminar, vec![1]);
    }

    #[test]
    fn test_planificar_primera_asignacion() {
        let plan = PlanReconciliacion::planificar(&[], &[5, 7]);

        assert!(plan.mantener.is_empty());
        assert_eq!(plan.crear, vec![5, 7]);
        assert!(plan.eliminar.is_empty());
    }

    #[test]
    fn test_planificar_conjunto_vacio_elimina_todo() {
        let plan = PlanReconciliacion::planificar(&[4, 9], &[]);

        assert!(plan.mantener.is_empty());
        assert!(plan.crear.is_empty());
        assert_eq!(plan.eliminar, vec![4, 9]);
    }

    #[test]
    fn test_planificar_mismo_conjunto_solo_mantiene() {
        let plan = PlanReconciliacion::planificar(&[1, 2, 3], &[1, 2, 3]);

        assert_eq!(plan.mantener, vec![1, 2, 3]);
        assert!(plan.crear.is_empty());
        assert!(plan.eliminar.is_empty());
        assert!(plan.sin_cambios_de_conjunto());
    }

    #[test]
    fn test_planificar_conserva_el_orden_del_deseado() {
        let plan = PlanReconciliacion::planificar(&[3], &[9, 3, 1]);

        assert_eq!(plan.mantener, vec![3]);
        assert_eq!(plan.crear, vec![9, 1]);
    }

    #[test]
    fn test_duplicados_rechazados() {
        let resultado = AsignacionService::validar_sin_duplicados(&[1, 2, 1]);
        assert!(resultado.is_err());
    }

    #[test]
    fn test_sin_duplicados_acepta_vacio() {
        assert!(AsignacionService::validar_sin_duplicados(&[]).is_ok());
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::comision::{ComisionDetallada, EstadoComision, TrabajoConComision};
use crate::models::trabajo::{DetalleGasto, MecanicoAsignado, TrabajoConTotales};

// Gasto real de un trabajo (request)
#[derive(Debug, Deserialize, Validate)]
pub struct DetalleGastoRequest {
    #[validate(length(min = 1, max = 255))]
    pub descripcion: String,

    pub monto: Decimal,

    pub monto_cobrado: Option<Decimal>,
}

// Request para crear un trabajo con sus gastos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrabajoRequest {
    #[validate(length(min = 5, max = 20))]
    pub matricula_carro: String,

    #[validate(length(min = 1, max = 255))]
    pub descripcion: String,

    // Formato YYYY-MM-DD
    pub fecha: String,

    pub fecha_registro: Option<String>,

    pub costo: Decimal,

    pub mano_obra: Option<Decimal>,

    pub markup_repuestos: Option<Decimal>,

    pub aplica_iva: Option<bool>,

    #[serde(default)]
    #[validate]
    pub detalle_gastos: Vec<DetalleGastoRequest>,
}

// Request para actualizar un trabajo (reemplaza los gastos)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrabajoRequest {
    #[validate(length(min = 1, max = 255))]
    pub descripcion: String,

    pub costo: Decimal,

    pub mano_obra: Option<Decimal>,

    pub markup_repuestos: Option<Decimal>,

    pub aplica_iva: Option<bool>,

    #[serde(default)]
    #[validate]
    pub detalle_gastos: Vec<DetalleGastoRequest>,
}

// Response del listado de trabajos con totales y mecánicos asignados
#[derive(Debug, Serialize)]
pub struct TrabajoResponse {
    pub id: i32,
    pub matricula_carro: String,
    pub descripcion: String,
    pub fecha: String,
    pub fecha_registro: String,
    pub costo: Decimal,
    pub mano_obra: Decimal,
    pub markup_repuestos: Decimal,
    pub ganancia: Decimal,
    pub aplica_iva: bool,
    pub total_gastos: Decimal,
    pub ganancia_total: Decimal,
    pub ganancia_base_comisiones: Decimal,
    pub mecanicos_ids: Vec<i32>,
    pub mecanicos_nombres: Vec<String>,
    pub total_mecanicos: usize,
}

// Response de un gasto
#[derive(Debug, Serialize)]
pub struct DetalleGastoResponse {
    pub id: i32,
    pub descripcion: String,
    pub monto: Decimal,
    pub monto_cobrado: Option<Decimal>,
}

// Response de un trabajo con sus gastos
#[derive(Debug, Serialize)]
pub struct TrabajoDetalleResponse {
    pub id: i32,
    pub matricula_carro: String,
    pub descripcion: String,
    pub fecha: String,
    pub fecha_registro: String,
    pub costo: Decimal,
    pub mano_obra: Decimal,
    pub markup_repuestos: Decimal,
    pub ganancia: Decimal,
    pub aplica_iva: bool,
    pub gastos: Vec<DetalleGastoResponse>,
}

// Response al crear un trabajo
#[derive(Debug, Serialize)]
pub struct CrearTrabajoResponse {
    pub message: String,
    pub id: i32,
    pub ganancia_calculada: Decimal,
}

// Response al actualizar un trabajo
#[derive(Debug, Serialize)]
pub struct ActualizarTrabajoResponse {
    pub message: String,
    pub ganancia_calculada: Decimal,
}

// Request para asignar mecánicos a un trabajo (reconciliación)
#[derive(Debug, Deserialize)]
pub struct AsignarMecanicosRequest {
    pub mecanicos: Vec<i32>,
    pub porcentaje: Option<Decimal>,
}

// Response de asignación con detalles del mecánico
#[derive(Debug, Serialize)]
pub struct AsignacionMecanicoResponse {
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub nombre_mecanico: String,
    pub porcentaje_comision: Decimal,
    pub monto_comision: Decimal,
    pub ganancia_trabajo: Decimal,
}

// Mecánico asignado a un trabajo (proyección para el dashboard)
#[derive(Debug, Serialize)]
pub struct MecanicoAsignadoResponse {
    pub id_mecanico: i32,
    pub nombre_mecanico: String,
    pub porcentaje_comision: Decimal,
    pub monto_comision: Decimal,
    pub fecha_asignacion: String,
}

// Trabajo enriquecido con la comisión de un mecánico
#[derive(Debug, Serialize)]
pub struct TrabajoMecanicoItem {
    pub id: i32,
    pub fecha: String,
    pub matricula_carro: String,
    pub descripcion: String,
    pub costo: Decimal,
    pub mano_obra: Decimal,
    pub total_gastos: Decimal,
    pub ganancia_base: Decimal,
    pub comision: Decimal,
    pub porcentaje_comision: Decimal,
    pub estado_comision: EstadoComision,
    pub quincena: Option<String>,
}

impl TrabajoResponse {
    pub fn nuevo(trabajo: TrabajoConTotales, asignados: &[MecanicoAsignado]) -> Self {
        let ganancia_total = trabajo.costo - trabajo.total_gastos;
        // Misma base que el cálculo de comisiones: nunca negativa
        let ganancia_base_comisiones =
            (trabajo.mano_obra - trabajo.total_gastos).max(Decimal::ZERO);
        let mecanicos_ids: Vec<i32> = asignados.iter().map(|m| m.id_mecanico).collect();
        let mecanicos_nombres: Vec<String> =
            asignados.iter().map(|m| m.nombre.clone()).collect();

        Self {
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
            total_gastos: trabajo.total_gastos,
            ganancia_total,
            ganancia_base_comisiones,
            total_mecanicos: mecanicos_ids.len(),
            mecanicos_ids,
            mecanicos_nombres,
        }
    }
}

impl From<DetalleGasto> for DetalleGastoResponse {
    fn from(gasto: DetalleGasto) -> Self {
        Self {
            id: gasto.id,
            descripcion: gasto.descripcion,
            monto: gasto.monto,
            monto_cobrado: gasto.monto_cobrado,
        }
    }
}

impl From<&ComisionDetallada> for AsignacionMecanicoResponse {
    fn from(comision: &ComisionDetallada) -> Self {
        Self {
            id_trabajo: comision.id_trabajo,
            id_mecanico: comision.id_mecanico,
            nombre_mecanico: comision.nombre_mecanico.clone(),
            porcentaje_comision: comision.porcentaje_comision,
            monto_comision: comision.monto_comision,
            ganancia_trabajo: comision.ganancia_trabajo,
        }
    }
}

impl From<&ComisionDetallada> for MecanicoAsignadoResponse {
    fn from(comision: &ComisionDetallada) -> Self {
        Self {
            id_mecanico: comision.id_mecanico,
            nombre_mecanico: comision.nombre_mecanico.clone(),
            porcentaje_comision: comision.porcentaje_comision,
            monto_comision: comision.monto_comision,
            fecha_asignacion: comision.created_at.to_rfc3339(),
        }
    }
}

impl From<TrabajoConComision> for TrabajoMecanicoItem {
    fn from(fila: TrabajoConComision) -> Self {
        Self {
            id: fila.id,
            fecha: fila.fecha.to_rfc3339(),
            matricula_carro: fila.matricula_carro,
            descripcion: fila.descripcion,
            costo: fila.costo,
            mano_obra: fila.mano_obra,
            total_gastos: fila.total_gastos,
            ganancia_base: fila.ganancia_base,
            comision: fila.comision,
            porcentaje_comision: fila.porcentaje_comision,
            estado_comision: fila.estado_comision,
            quincena: fila.quincena,
        }
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::comision::{ComisionDetallada, ComisionMecanico, EstadoComision};
use crate::models::quincena::Quincena;

// Response al estampar quincenas pendientes
#[derive(Debug, Serialize)]
pub struct GenerarQuincenaResponse {
    pub message: String,
    pub quincena: String,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    pub comisiones_actualizadas: u64,
}

// Comisión individual dentro del listado por quincena
#[derive(Debug, Serialize)]
pub struct ComisionQuincenaItem {
    pub id: i32,
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub nombre_mecanico: String,
    pub descripcion_trabajo: String,
    pub monto_comision: Decimal,
    pub estado_comision: EstadoComision,
    pub quincena: Option<String>,
    pub fecha_calculo: String,
}

// Envoltura del listado de comisiones de una quincena
#[derive(Debug, Serialize)]
pub struct ComisionesQuincenaResponse {
    pub quincena: String,
    pub total_comisiones: usize,
    pub comisiones: Vec<ComisionQuincenaItem>,
}

// Request para liquidar las comisiones de un mecánico en una quincena
#[derive(Debug, Deserialize)]
pub struct LiquidarQuincenaRequest {
    pub aprobar: bool,
}

// Response de liquidación de quincena
#[derive(Debug, Serialize)]
pub struct LiquidarQuincenaResponse {
    pub message: String,
    pub id_mecanico: i32,
    pub quincena: String,
    pub nuevo_estado: EstadoComision,
    pub comisiones_actualizadas: u64,
    pub monto_total: Decimal,
}

// Request para el cambio manual de estado de una comisión
#[derive(Debug, Deserialize)]
pub struct CambiarEstadoRequest {
    pub estado: EstadoComision,
}

// Response del cambio manual de estado
#[derive(Debug, Serialize)]
pub struct CambiarEstadoResponse {
    pub message: String,
    pub id_comision: i32,
    pub nuevo_estado: EstadoComision,
}

// Resumen del reporte financiero de una quincena
#[derive(Debug, Serialize)]
pub struct ResumenFinanciero {
    pub total_comisiones_aprobadas: usize,
    pub total_gastos_comisiones: Decimal,
    pub total_comisiones_penalizadas: usize,
    pub total_ahorro_penalizaciones: Decimal,
    pub total_comisiones_pendientes: usize,
    pub total_pendiente: Decimal,
    pub total_comisiones_denegadas: usize,
    pub total_denegadas: Decimal,
}

// Comisión resumida dentro del reporte financiero
#[derive(Debug, Serialize)]
pub struct ComisionResumenItem {
    pub id: i32,
    pub id_mecanico: i32,
    pub monto_comision: Decimal,
}

// Reporte financiero completo de una quincena
#[derive(Debug, Serialize)]
pub struct ReporteFinancieroResponse {
    pub quincena: String,
    pub resumen: ResumenFinanciero,
    pub comisiones_aprobadas: Vec<ComisionResumenItem>,
    pub comisiones_penalizadas: Vec<ComisionResumenItem>,
    pub comisiones_denegadas: Vec<ComisionResumenItem>,
}

impl From<&ComisionDetallada> for ComisionQuincenaItem {
    fn from(comision: &ComisionDetallada) -> Self {
        Self {
            id: comision.id,
            id_trabajo: comision.id_trabajo,
            id_mecanico: comision.id_mecanico,
            nombre_mecanico: comision.nombre_mecanico.clone(),
            descripcion_trabajo: comision.descripcion_trabajo.clone(),
            monto_comision: comision.monto_comision,
            estado_comision: comision.estado_comision,
            quincena: comision.quincena.clone(),
            fecha_calculo: comision.fecha_calculo.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl From<&ComisionMecanico> for ComisionResumenItem {
    fn from(comision: &ComisionMecanico) -> Self {
        Self {
            id: comision.id,
            id_mecanico: comision.id_mecanico,
            monto_comision: comision.monto_comision,
        }
    }
}

impl ComisionesQuincenaResponse {
    pub fn nueva(quincena: &Quincena, comisiones: &[ComisionDetallada]) -> Self {
        Self {
            quincena: quincena.to_string(),
            total_comisiones: comisiones.len(),
            comisiones: comisiones.iter().map(ComisionQuincenaItem::from).collect(),
        }
    }
}

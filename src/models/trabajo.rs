//! Modelo de Trabajo
//!
//! Este módulo contiene los structs Trabajo y DetalleGasto que mapean
//! exactamente a las tablas trabajos y detalles_gastos del schema
//! PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Trabajo principal - mapea exactamente a la tabla trabajos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trabajo {
    pub id: i32,
    pub matricula_carro: String,
    pub descripcion: String,
    pub fecha: DateTime<Utc>,
    pub fecha_registro: DateTime<Utc>,
    pub costo: Decimal,
    pub mano_obra: Decimal,
    pub markup_repuestos: Decimal,
    pub ganancia: Decimal,
    pub aplica_iva: bool,
}

/// Gasto asociado a un trabajo - mapea a la tabla detalles_gastos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DetalleGasto {
    pub id: i32,
    pub id_trabajo: i32,
    pub descripcion: String,
    pub monto: Decimal,
    pub monto_cobrado: Option<Decimal>,
}

/// Gasto todavía sin persistir (alta o reemplazo de gastos)
#[derive(Debug, Clone)]
pub struct NuevoGasto {
    pub descripcion: String,
    pub monto: Decimal,
    pub monto_cobrado: Option<Decimal>,
}

/// Trabajo con el total de gastos reales agregado (JOIN para listados)
#[derive(Debug, Clone, FromRow)]
pub struct TrabajoConTotales {
    pub id: i32,
    pub matricula_carro: String,
    pub descripcion: String,
    pub fecha: DateTime<Utc>,
    pub fecha_registro: DateTime<Utc>,
    pub costo: Decimal,
    pub mano_obra: Decimal,
    pub markup_repuestos: Decimal,
    pub ganancia: Decimal,
    pub aplica_iva: bool,
    pub total_gastos: Decimal,
}

/// Mecánico asignado a un trabajo (proyección mínima para listados)
#[derive(Debug, Clone, FromRow)]
pub struct MecanicoAsignado {
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub nombre: String,
}

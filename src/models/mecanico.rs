//! Modelo de Mecanico
//!
//! Este módulo contiene el struct Mecanico que mapea exactamente a la
//! tabla mecanicos del schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Mecanico principal - mapea exactamente a la tabla mecanicos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Mecanico {
    pub id: i32,
    pub id_nacional: String,
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub porcentaje_comision: Decimal,
    pub fecha_contratacion: DateTime<Utc>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

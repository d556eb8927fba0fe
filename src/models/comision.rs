//! Modelo de ComisionMecanico
//!
//! Este módulo contiene el struct ComisionMecanico y el enum de estados
//! de aprobación. Mapea exactamente a la tabla comisiones_mecanicos del
//! schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;

/// Estado de aprobación de una comisión - mapea al ENUM estado_comision
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "estado_comision", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EstadoComision {
    Pendiente,
    Aprobada,
    Penalizada,
    Denegada,
}

impl EstadoComision {
    /// Solo las comisiones pendientes admiten cambio de estado;
    /// los estados resueltos son inmutables
    pub fn puede_transicionar_a(&self, nuevo: EstadoComision) -> bool {
        matches!(self, EstadoComision::Pendiente) && nuevo != EstadoComision::Pendiente
    }

    pub fn es_pendiente(&self) -> bool {
        matches!(self, EstadoComision::Pendiente)
    }
}

impl fmt::Display for EstadoComision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EstadoComision::Pendiente => "PENDIENTE",
            EstadoComision::Aprobada => "APROBADA",
            EstadoComision::Penalizada => "PENALIZADA",
            EstadoComision::Denegada => "DENEGADA",
        };
        write!(f, "{}", s)
    }
}

/// ComisionMecanico principal - mapea exactamente a la tabla comisiones_mecanicos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ComisionMecanico {
    pub id: i32,
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub ganancia_trabajo: Decimal,
    pub porcentaje_comision: Decimal,
    pub monto_comision: Decimal,
    pub fecha_calculo: DateTime<Utc>,
    pub mes_reporte: String,
    pub estado_comision: EstadoComision,
    pub quincena: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comisión recién calculada, todavía sin persistir
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuevaComision {
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub ganancia_trabajo: Decimal,
    pub porcentaje_comision: Decimal,
    pub monto_comision: Decimal,
}

/// Fila de comisión con nombre del mecánico y descripción del trabajo
/// (JOIN para los listados por quincena y la proyección de asignaciones)
#[derive(Debug, Clone, FromRow)]
pub struct ComisionDetallada {
    pub id: i32,
    pub id_trabajo: i32,
    pub id_mecanico: i32,
    pub nombre_mecanico: String,
    pub descripcion_trabajo: String,
    pub ganancia_trabajo: Decimal,
    pub porcentaje_comision: Decimal,
    pub monto_comision: Decimal,
    pub fecha_calculo: DateTime<Utc>,
    pub estado_comision: EstadoComision,
    pub quincena: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Trabajo enriquecido con la comisión de un mecánico concreto
/// (JOIN para el historial de trabajos del mecánico)
#[derive(Debug, Clone, FromRow)]
pub struct TrabajoConComision {
    pub id: i32,
    pub fecha: DateTime<Utc>,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pendiente_transiciona_a_estados_resueltos() {
        let pendiente = EstadoComision::Pendiente;
        assert!(pendiente.puede_transicionar_a(EstadoComision::Aprobada));
        assert!(pendiente.puede_transicionar_a(EstadoComision::Denegada));
        assert!(pendiente.puede_transicionar_a(EstadoComision::Penalizada));
        assert!(!pendiente.puede_transicionar_a(EstadoComision::Pendiente));
    }

    #[test]
    fn test_estados_resueltos_son_inmutables() {
        for resuelto in [
            EstadoComision::Aprobada,
            EstadoComision::Denegada,
            EstadoComision::Penalizada,
        ] {
            assert!(!resuelto.puede_transicionar_a(EstadoComision::Pendiente));
            assert!(!resuelto.puede_transicionar_a(EstadoComision::Aprobada));
            assert!(!resuelto.puede_transicionar_a(EstadoComision::Denegada));
            assert!(!resuelto.puede_transicionar_a(EstadoComision::Penalizada));
        }
    }

    #[test]
    fn test_display_coincide_con_el_enum_de_postgres() {
        assert_eq!(EstadoComision::Pendiente.to_string(), "PENDIENTE");
        assert_eq!(EstadoComision::Aprobada.to_string(), "APROBADA");
        assert_eq!(EstadoComision::Penalizada.to_string(), "PENALIZADA");
        assert_eq!(EstadoComision::Denegada.to_string(), "DENEGADA");
    }

    #[test]
    fn test_serde_usa_mayusculas() {
        let json = serde_json::to_string(&EstadoComision::Aprobada).unwrap();
        assert_eq!(json, "\"APROBADA\"");

        let parsed: EstadoComision = serde_json::from_str("\"DENEGADA\"").unwrap();
        assert_eq!(parsed, EstadoComision::Denegada);
    }
}

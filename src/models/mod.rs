//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod comision;
pub mod mecanico;
pub mod quincena;
pub mod trabajo;

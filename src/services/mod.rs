//! Servicios de negocio del motor de comisiones
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! encapsulan operaciones que involucran varios repositorios dentro de una
//! misma transacción; el cálculo en sí es puro y vive en su propio servicio.

pub mod asignacion_service;
pub mod comision_service;
pub mod liquidacion_service;

pub use asignacion_service::*;
pub use comision_service::*;
pub use liquidacion_service::*;

//! DTOs de la API
//!
//! Requests y responses que viajan por HTTP, separados de los modelos
//! que mapean al schema.

pub mod comision_dto;
pub mod mecanico_dto;
pub mod trabajo_dto;

//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQL de una tabla. Las funciones
//! asociadas que reciben `&mut PgConnection` participan en transacciones
//! abiertas por los servicios.

pub mod comision_repository;
pub mod mecanico_repository;
pub mod trabajo_repository;

pub use comision_repository::ComisionRepository;
pub use mecanico_repository::MecanicoRepository;
pub use trabajo_repository::TrabajoRepository;

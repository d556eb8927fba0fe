//! Controladores HTTP del taller
//!
//! Cada controlador agrupa la lógica de un recurso y delega en los
//! repositorios y servicios correspondientes.

pub mod comision_controller;
pub mod mecanico_controller;
pub mod trabajo_controller;

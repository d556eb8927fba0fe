//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y otras capas
//! transversales de la API.

pub mod cors;

pub use cors::*;

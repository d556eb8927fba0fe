//! API de gestión de comisiones del taller mecánico
//!
//! Backend del taller: registro de mecánicos, trabajos con sus gastos,
//! y el ciclo completo de comisiones (cálculo, asignación, quincenas
//! y liquidación).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

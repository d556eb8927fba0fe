use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::comision::EstadoComision;
use crate::models::mecanico::Mecanico;

// Request para registrar un mecánico
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMecanicoRequest {
    #[validate(length(min = 1, max = 20))]
    pub id_nacional: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(max = 100))]
    pub correo: Option<String>,

    #[validate(length(max = 20))]
    pub telefono: Option<String>,

    pub porcentaje_comision: Option<Decimal>,
}

// Request para actualizar un mecánico
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMecanicoRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(max = 100))]
    pub correo: Option<String>,

    #[validate(length(max = 20))]
    pub telefono: Option<String>,

    pub porcentaje_comision: Option<Decimal>,

    pub activo: Option<bool>,
}

// Response de mecánico
#[derive(Debug, Serialize)]
pub struct MecanicoResponse {
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

// Response de mecánico con sus estadísticas de comisiones
#[derive(Debug, Serialize)]
pub struct MecanicoConEstadisticasResponse {
    pub id: i32,
    pub id_nacional: String,
    pub nombre: String,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub porcentaje_comision: Decimal,
    pub fecha_contratacion: DateTime<Utc>,
    pub activo: bool,
    pub trabajos_completados: i64,
    pub total_ganancias: Decimal,
    pub total_comisiones: Decimal,
}

// Filtros de paginación para el listado de mecánicos
#[derive(Debug, Deserialize)]
pub struct ListarMecanicosQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub activo: Option<bool>,
}

// Parámetros de búsqueda por nombre o id nacional
#[derive(Debug, Deserialize)]
pub struct BuscarMecanicosQuery {
    pub q: String,
    pub limit: Option<i64>,
}

// Filtros opcionales de estadísticas
#[derive(Debug, Deserialize)]
pub struct EstadisticasQuery {
    pub mes: Option<String>,
    pub quincena: Option<String>,
    pub estado: Option<EstadoComision>,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

impl From<Mecanico> for MecanicoResponse {
    fn from(mecanico: Mecanico) -> Self {
        Self {
            id: mecanico.id,
            id_nacional: mecanico.id_nacional,
            nombre: mecanico.nombre,
            correo: mecanico.correo,
            telefono: mecanico.telefono,
            porcentaje_comision: mecanico.porcentaje_comision,
            fecha_contratacion: mecanico.fecha_contratacion,
            activo: mecanico.activo,
            created_at: mecanico.created_at,
            updated_at: mecanico.updated_at,
        }
    }
}

impl MecanicoConEstadisticasResponse {
    pub fn nuevo(
        mecanico: Mecanico,
        trabajos_completados: i64,
        total_ganancias: Decimal,
        total_comisiones: Decimal,
    ) -> Self {
        Self {
            id: mecanico.id,
            id_nacional: mecanico.id_nacional,
            nombre: mecanico.nombre,
            correo: mecanico.correo,
            telefono: mecanico.telefono,
            porcentaje_comision: mecanico.porcentaje_comision,
            fecha_contratacion: mecanico.fecha_contratacion,
            activo: mecanico.activo,
            trabajos_completados,
            total_ganancias,
            total_comisiones,
        }
    }
}

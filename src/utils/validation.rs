//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveDate;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Agrupar el error de un solo campo en un `ValidationErrors`
pub fn field_errors(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_date() {
        let valid_date = "2024-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2024/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_range_decimal() {
        assert!(validate_range(dec!(2.00), dec!(0), dec!(100)).is_ok());
        assert!(validate_range(dec!(100.01), dec!(0), dec!(100)).is_err());
        assert!(validate_range(dec!(-0.5), dec!(0), dec!(100)).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(dec!(0)).is_ok());
        assert!(validate_non_negative(dec!(12.50)).is_ok());
        assert!(validate_non_negative(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_field_errors_conserva_el_campo() {
        let error = ValidationError::new("range");
        let errors = field_errors("porcentaje_comision", error);
        assert!(errors.field_errors().contains_key("porcentaje_comision"));
    }
}

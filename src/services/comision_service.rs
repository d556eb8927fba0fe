//! Servicio de cálculo de comisiones
//!
//! Lógica pura del cálculo: ganancia base del trabajo (mano de obra menos
//! gastos reales, nunca negativa) y reparto equitativo de la comisión entre
//! los mecánicos asignados. Todo el dinero se maneja con Decimal.

use lazy_static::lazy_static;
use rust_decimal::Decimal;

use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    /// Porcentaje de comisión por defecto del taller (2%)
    pub static ref PORCENTAJE_COMISION_DEFAULT: Decimal = Decimal::new(200, 2);
}

/// Resultado del cálculo de comisiones de un trabajo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculoComision {
    pub ganancia_base: Decimal,
    pub comision_total: Decimal,
    pub comision_por_mecanico: Decimal,
}

pub struct ComisionService;

impl ComisionService {
    /// Ganancia base para comisiones: mano de obra menos gastos reales.
    /// Un resultado negativo se fija en cero
    pub fn ganancia_base(mano_obra: Decimal, gastos_reales: Decimal) -> Decimal {
        (mano_obra - gastos_reales).max(Decimal::ZERO)
    }

    /// Calcula la comisión de un trabajo repartida equitativamente
    /// entre `cantidad_mecanicos` mecánicos
    pub fn calcular(
        mano_obra: Decimal,
        gastos_reales: Decimal,
        porcentaje: Decimal,
        cantidad_mecanicos: usize,
    ) -> AppResult<CalculoComision> {
        if cantidad_mecanicos == 0 {
            return Err(AppError::BadRequest(
                "No se puede calcular comisiones sin mecánicos asignados".to_string(),
            ));
        }

        if porcentaje < Decimal::ZERO || porcentaje > Decimal::ONE_HUNDRED {
            return Err(AppError::BadRequest(format!(
                "Porcentaje de comisión inválido: {}. Debe estar entre 0 y 100",
                porcentaje
            )));
        }

        let ganancia_base = Self::ganancia_base(mano_obra, gastos_reales);
        let comision_total = (ganancia_base * porcentaje / Decimal::ONE_HUNDRED).round_dp(2);
        let comision_por_mecanico =
            (comision_total / Decimal::from(cantidad_mecanicos as u64)).round_dp(2);

        Ok(CalculoComision {
            ganancia_base,
            comision_total,
            comision_por_mecanico,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_escenario_de_referencia_dos_mecanicos() {
        // Mano de obra 50,000, gastos 10,000, 2% entre 2 mecánicos
        let calculo =
            ComisionService::calcular(dec!(50000), dec!(10000), dec!(2.00), 2).unwrap();

        assert_eq!(calculo.ganancia_base, dec!(40000));
        assert_eq!(calculo.comision_total, dec!(800.00));
        assert_eq!(calculo.comision_por_mecanico, dec!(400.00));
    }

    #[test]
    fn test_gastos_mayores_que_mano_obra_da_cero() {
        let calculo =
            ComisionService::calcular(dec!(10000), dec!(15000), dec!(2.00), 2).unwrap();

        assert_eq!(calculo.ganancia_base, Decimal::ZERO);
        assert_eq!(calculo.comision_total, Decimal::ZERO);
        assert_eq!(calculo.comision_por_mecanico, Decimal::ZERO);
    }

    #[test]
    fn test_un_solo_mecanico_recibe_el_total() {
        let calculo =
            ComisionService::calcular(dec!(30000), dec!(5000), dec!(2.00), 1).unwrap();

        assert_eq!(calculo.comision_total, dec!(500.00));
        assert_eq!(calculo.comision_por_mecanico, dec!(500.00));
    }

    #[test]
    fn test_sin_mecanicos_es_error() {
        let resultado = ComisionService::calcular(dec!(50000), dec!(10000), dec!(2.00), 0);
        assert!(matches!(resultado, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_porcentaje_fuera_de_rango_es_error() {
        assert!(ComisionService::calcular(dec!(1000), dec!(0), dec!(-1), 1).is_err());
        assert!(ComisionService::calcular(dec!(1000), dec!(0), dec!(100.01), 1).is_err());
    }

    #[test]
    fn test_porcentaje_personalizado() {
        let calculo =
            ComisionService::calcular(dec!(20000), dec!(4000), dec!(5.00), 2).unwrap();

        assert_eq!(calculo.ganancia_base, dec!(16000));
        assert_eq!(calculo.comision_total, dec!(800.00));
        assert_eq!(calculo.comision_por_mecanico, dec!(400.00));
    }

    #[test]
    fn test_reparto_entre_tres_queda_dentro_de_un_centavo() {
        // Total 100.00 entre 3: 33.33 por mecánico, 99.99 en conjunto
        let calculo =
            ComisionService::calcular(dec!(5000), dec!(0), dec!(2.00), 3).unwrap();

        assert_eq!(calculo.comision_total, dec!(100.00));
        assert_eq!(calculo.comision_por_mecanico, dec!(33.33));

        let suma = calculo.comision_por_mecanico * Decimal::from(3u32);
        let diferencia = (calculo.comision_total - suma).abs();
        assert!(diferencia <= dec!(0.01));
    }

    #[test]
    fn test_ganancia_base_nunca_negativa() {
        assert_eq!(ComisionService::ganancia_base(dec!(100), dec!(100)), Decimal::ZERO);
        assert_eq!(ComisionService::ganancia_base(dec!(99.99), dec!(100)), Decimal::ZERO);
        assert_eq!(ComisionService::ganancia_base(dec!(100.01), dec!(100)), dec!(0.01));
    }

    #[test]
    fn test_porcentaje_default_es_dos() {
        assert_eq!(*PORCENTAJE_COMISION_DEFAULT, dec!(2.00));
    }
}

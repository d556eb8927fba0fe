//! Modelo de Quincena
//!
//! Tipo de valor para las etiquetas de quincena con formato `YYYY-MM-Q1`
//! o `YYYY-MM-Q2`. La primera quincena cubre los días 1 al 15 del mes y
//! la segunda del día 16 al último día del mes.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::errors::AppError;

lazy_static! {
    static ref QUINCENA_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{2})-Q([12])$").unwrap();
}

/// Error para etiquetas de quincena mal formadas
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Etiqueta de quincena inválida: '{0}'. Formato esperado: YYYY-MM-Q1 o YYYY-MM-Q2")]
pub struct QuincenaInvalida(pub String);

impl From<QuincenaInvalida> for AppError {
    fn from(e: QuincenaInvalida) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

/// Etiqueta de quincena validada (año, mes y mitad del mes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quincena {
    anio: i32,
    mes: u32,
    numero: u8,
}

impl Quincena {
    /// Construye una quincena validando año, mes y número
    pub fn new(anio: i32, mes: u32, numero: u8) -> Result<Self, QuincenaInvalida> {
        if !(2000..=2100).contains(&anio)
            || !(1..=12).contains(&mes)
            || !(1..=2).contains(&numero)
        {
            return Err(QuincenaInvalida(format!("{:04}-{:02}-Q{}", anio, mes, numero)));
        }
        Ok(Self { anio, mes, numero })
    }

    /// Clasifica una fecha en su quincena: días 1-15 van a Q1,
    /// del 16 en adelante a Q2
    pub fn clasificar(fecha: NaiveDate) -> Self {
        let numero = if fecha.day() <= 15 { 1 } else { 2 };
        Self {
            anio: fecha.year(),
            mes: fecha.month(),
            numero,
        }
    }

    /// Límites de la quincena como fechas inclusivas [inicio, fin]
    pub fn limites(&self) -> (NaiveDate, NaiveDate) {
        // año y mes quedaron validados en la construcción
        let dia_inicio = if self.numero == 1 { 1 } else { 16 };
        let inicio = NaiveDate::from_ymd_opt(self.anio, self.mes, dia_inicio).unwrap();
        let fin = if self.numero == 1 {
            NaiveDate::from_ymd_opt(self.anio, self.mes, 15).unwrap()
        } else {
            ultimo_dia_del_mes(self.anio, self.mes)
        };
        (inicio, fin)
    }

    /// Rango UTC semiabierto [inicio, fin) para consultas por timestamp
    pub fn rango_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (inicio, fin) = self.limites();
        let inicio_ts = Utc.from_utc_datetime(&inicio.and_time(NaiveTime::MIN));
        let fin_ts = Utc.from_utc_datetime(&fin.succ_opt().unwrap().and_time(NaiveTime::MIN));
        (inicio_ts, fin_ts)
    }

    /// Mes de reporte en formato YYYY-MM
    pub fn mes_reporte(&self) -> String {
        format!("{:04}-{:02}", self.anio, self.mes)
    }

    pub fn anio(&self) -> i32 {
        self.anio
    }

    pub fn mes(&self) -> u32 {
        self.mes
    }

    pub fn numero(&self) -> u8 {
        self.numero
    }
}

impl fmt::Display for Quincena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-Q{}", self.anio, self.mes, self.numero)
    }
}

impl FromStr for Quincena {
    type Err = QuincenaInvalida;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let etiqueta = s.trim();
        let caps = QUINCENA_REGEX
            .captures(etiqueta)
            .ok_or_else(|| QuincenaInvalida(etiqueta.to_string()))?;
        let anio: i32 = caps[1]
            .parse()
            .map_err(|_| QuincenaInvalida(etiqueta.to_string()))?;
        let mes: u32 = caps[2]
            .parse()
            .map_err(|_| QuincenaInvalida(etiqueta.to_string()))?;
        let numero: u8 = caps[3]
            .parse()
            .map_err(|_| QuincenaInvalida(etiqueta.to_string()))?;
        Self::new(anio, mes, numero).map_err(|_| QuincenaInvalida(etiqueta.to_string()))
    }
}

fn ultimo_dia_del_mes(anio: i32, mes: u32) -> NaiveDate {
    let (a, m) = if mes == 12 { (anio + 1, 1) } else { (anio, mes + 1) };
    NaiveDate::from_ymd_opt(a, m, 1).unwrap().pred_opt().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(anio: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(anio, mes, dia).unwrap()
    }

    #[test]
    fn test_parse_etiquetas_validas() {
        let q1: Quincena = "2025-01-Q1".parse().unwrap();
        assert_eq!(q1.anio(), 2025);
        assert_eq!(q1.mes(), 1);
        assert_eq!(q1.numero(), 1);

        let q2: Quincena = "2025-12-Q2".parse().unwrap();
        assert_eq!(q2.mes(), 12);
        assert_eq!(q2.numero(), 2);
    }

    #[test]
    fn test_parse_rechaza_etiquetas_invalidas() {
        assert!("2025-13-Q1".parse::<Quincena>().is_err());
        assert!("2025-00-Q2".parse::<Quincena>().is_err());
        assert!("2025-01-Q3".parse::<Quincena>().is_err());
        assert!("2025-1-Q1".parse::<Quincena>().is_err());
        assert!("25-01-Q1".parse::<Quincena>().is_err());
        assert!("2025-01".parse::<Quincena>().is_err());
        assert!("garbage".parse::<Quincena>().is_err());
        assert!("".parse::<Quincena>().is_err());
    }

    #[test]
    fn test_parse_tolera_espacios() {
        let q: Quincena = "  2025-06-Q1 ".parse().unwrap();
        assert_eq!(q.to_string(), "2025-06-Q1");
    }

    #[test]
    fn test_display_roundtrip() {
        for etiqueta in ["2024-02-Q1", "2024-02-Q2", "2025-11-Q2"] {
            let q: Quincena = etiqueta.parse().unwrap();
            assert_eq!(q.to_string(), etiqueta);
        }
    }

    #[test]
    fn test_clasificar_dia_frontera() {
        assert_eq!(Quincena::clasificar(fecha(2025, 3, 1)).to_string(), "2025-03-Q1");
        assert_eq!(Quincena::clasificar(fecha(2025, 3, 15)).to_string(), "2025-03-Q1");
        assert_eq!(Quincena::clasificar(fecha(2025, 3, 16)).to_string(), "2025-03-Q2");
        assert_eq!(Quincena::clasificar(fecha(2025, 3, 31)).to_string(), "2025-03-Q2");
    }

    #[test]
    fn test_limites_primera_quincena() {
        let q: Quincena = "2025-03-Q1".parse().unwrap();
        assert_eq!(q.limites(), (fecha(2025, 3, 1), fecha(2025, 3, 15)));
    }

    #[test]
    fn test_limites_segunda_quincena_meses_cortos_y_largos() {
        let feb: Quincena = "2025-02-Q2".parse().unwrap();
        assert_eq!(feb.limites(), (fecha(2025, 2, 16), fecha(2025, 2, 28)));

        let feb_bisiesto: Quincena = "2024-02-Q2".parse().unwrap();
        assert_eq!(feb_bisiesto.limites(), (fecha(2024, 2, 16), fecha(2024, 2, 29)));

        let dic: Quincena = "2025-12-Q2".parse().unwrap();
        assert_eq!(dic.limites(), (fecha(2025, 12, 16), fecha(2025, 12, 31)));
    }

    #[test]
    fn test_clasificar_y_limites_son_inversos() {
        for mes in 1..=12u32 {
            for numero in 1..=2u8 {
                let q = Quincena::new(2025, mes, numero).unwrap();
                let (inicio, fin) = q.limites();
                assert_eq!(Quincena::clasificar(inicio), q);
                assert_eq!(Quincena::clasificar(fin), q);
            }
        }
    }

    #[test]
    fn test_rango_utc_es_semiabierto() {
        let q: Quincena = "2025-02-Q2".parse().unwrap();
        let (inicio, fin) = q.rango_utc();
        assert_eq!(inicio.to_rfc3339(), "2025-02-16T00:00:00+00:00");
        assert_eq!(fin.to_rfc3339(), "2025-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_mes_reporte() {
        let q: Quincena = "2025-07-Q2".parse().unwrap();
        assert_eq!(q.mes_reporte(), "2025-07");
    }

    #[test]
    fn test_orden_cronologico() {
        let a: Quincena = "2024-12-Q2".parse().unwrap();
        let b: Quincena = "2025-01-Q1".parse().unwrap();
        let c: Quincena = "2025-01-Q2".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }
}

// src/models/parsing.rs

//! Conversão dos campos de texto do formulário, acumulando os erros de
//! todos os campos em um único `ValidationErrors`.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use validator::ValidationErrors;

use crate::common::{dates::parse_date, error::validation_error, masks};

#[derive(Debug, Default)]
pub struct FieldParser {
    errors: ValidationErrors,
}

impl FieldParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.errors.add(field, validation_error(code, message));
    }

    pub fn int(&mut self, field: &'static str, raw: &str, label: &str) -> i32 {
        let digits = raw.trim();
        match digits.parse::<i32>() {
            Ok(v) => v,
            Err(_) => {
                self.fail(field, "numero", format!("{} deve ser um número inteiro.", label));
                0
            }
        }
    }

    pub fn id(&mut self, field: &'static str, raw: &str, label: &str) -> i64 {
        match raw.trim().parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                self.fail(field, "required", format!("Selecione {}.", label));
                0
            }
        }
    }

    pub fn decimal(&mut self, field: &'static str, raw: &str, label: &str) -> Decimal {
        match masks::parse_decimal(raw) {
            Some(v) => v,
            None => {
                self.fail(field, "numero", format!("{} deve ser um número.", label));
                Decimal::ZERO
            }
        }
    }

    pub fn money(&mut self, field: &'static str, raw: &str, label: &str) -> Decimal {
        match masks::parse_currency(raw) {
            Some(v) => v,
            None => {
                self.fail(field, "moeda", format!("{} deve ser um valor em reais.", label));
                Decimal::ZERO
            }
        }
    }

    pub fn date(&mut self, field: &'static str, raw: &str, label: &str) -> NaiveDate {
        match parse_date(raw) {
            Some(d) => d,
            None => {
                self.fail(field, "data", format!("{} deve ser uma data válida.", label));
                NaiveDate::default()
            }
        }
    }

    pub fn optional_date(&mut self, field: &'static str, raw: &str, label: &str) -> Option<NaiveDate> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(self.date(field, raw, label))
    }

    pub fn time(&mut self, field: &'static str, raw: &str, label: &str) -> NaiveTime {
        let raw = raw.trim();
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .unwrap_or_else(|_| {
                self.fail(field, "hora", format!("{} deve estar no formato HH:MM.", label));
                NaiveTime::default()
            })
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}

/// Texto opcional: vazio vira `None`.
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_bad_field() {
        let mut p = FieldParser::new();
        let q = p.int("quantidade", "dez", "A quantidade");
        let d = p.date("data_compra", "ontem", "A data");
        let v = p.money("valor", "R$ 10,00", "O valor");
        assert_eq!(q, 0);
        assert_eq!(d, NaiveDate::default());
        assert_eq!(v, Decimal::new(1000, 2));

        let errors = p.finish(()).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("quantidade"));
        assert!(fields.contains_key("data_compra"));
        assert!(!fields.contains_key("valor"));
    }

    #[test]
    fn time_accepts_hours_and_minutes() {
        let mut p = FieldParser::new();
        let t = p.time("hora", "09:30", "A hora");
        assert_eq!(t, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(p.finish(()).is_ok());
    }
}

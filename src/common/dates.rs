// src/common/dates.rs

//! Adaptadores serde para datas do backend. O backend às vezes devolve
//! `2024-03-01` e às vezes `2024-03-01T00:00:00.000Z`; os dois são aceitos.
//! Na ida, sempre `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

const FORMAT: &str = "%Y-%m-%d";

/// Lê `YYYY-MM-DD`, um timestamp RFC 3339 ou `dd/mm/aaaa`.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(input, "%d/%m/%Y") {
        return Some(d);
    }
    let head = input.get(..10)?;
    NaiveDate::parse_from_str(head, FORMAT).ok()
}

pub mod flexible {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("data inválida: {}", raw)))
    }
}

pub mod flexible_option {
    use super::*;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date(text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("data inválida: {}", text))),
        }
    }
}

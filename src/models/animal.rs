// src/models/animal.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, error::field_error};
use crate::models::{
    EntityForm, References, Resource,
    parsing::{FieldParser, optional_text},
    validate_positive,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    pub id: i64,
    // Único dentro do lote
    pub numero_identificacao: String,
    pub id_lote: i64,
    pub peso: Decimal,
    #[serde(with = "dates::flexible")]
    pub data: NaiveDate,
    #[serde(default)]
    pub anotacoes: Option<String>,
}

// Uma pesagem do histórico (só cresce, consultado pelo número do brinco)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pesagem {
    pub numero_identificacao: String,
    pub peso: Decimal,
    #[serde(with = "dates::flexible")]
    pub data: NaiveDate,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct AnimalForm {
    #[validate(length(min = 1, message = "O número de identificação é obrigatório."))]
    pub numero_identificacao: String,
    #[validate(length(min = 1, message = "Selecione o lote."))]
    pub id_lote: String,
    #[validate(length(min = 1, message = "O peso é obrigatório."))]
    pub peso: String,
    #[validate(length(min = 1, message = "A data da pesagem é obrigatória."))]
    pub data: String,
    pub anotacoes: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct AnimalPayload {
    pub numero_identificacao: String,
    pub id_lote: i64,
    #[validate(custom(function = "validate_positive", message = "O peso deve ser maior que zero."))]
    pub peso: Decimal,
    #[serde(with = "dates::flexible")]
    pub data: NaiveDate,
    pub anotacoes: Option<String>,
}

impl EntityForm for AnimalForm {
    type Payload = AnimalPayload;

    fn to_payload(&self) -> Result<AnimalPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = AnimalPayload {
            numero_identificacao: self.numero_identificacao.trim().to_string(),
            id_lote: p.id("id_lote", &self.id_lote, "o lote"),
            peso: p.decimal("peso", &self.peso, "O peso"),
            data: p.date("data", &self.data, "A data da pesagem"),
            anotacoes: optional_text(&self.anotacoes),
        };
        p.finish(payload)
    }

    fn apply_references(
        &self,
        payload: &mut AnimalPayload,
        refs: &References,
        editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        if refs.lote_by_id(payload.id_lote).is_none() {
            return Err(field_error("id_lote", "lote", "O lote selecionado não existe."));
        }

        let duplicated = refs.animais.iter().any(|a| {
            a.id_lote == payload.id_lote
                && a.numero_identificacao.trim() == payload.numero_identificacao
                && Some(a.id) != editing
        });
        if duplicated {
            return Err(field_error(
                "numero_identificacao",
                "unico",
                format!(
                    "Já existe um animal com a identificação {} neste lote.",
                    payload.numero_identificacao
                ),
            ));
        }
        Ok(())
    }
}

impl Resource for Animal {
    const PATH: &'static str = "animal";
    const NOUN: &'static str = "animal";
    const NEEDS_LOTES: bool = true;
    type Form = AnimalForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        self.numero_identificacao.clone()
    }

    fn to_form(&self) -> AnimalForm {
        AnimalForm {
            numero_identificacao: self.numero_identificacao.clone(),
            id_lote: self.id_lote.to_string(),
            peso: self.peso.to_string(),
            data: self.data.format("%Y-%m-%d").to_string(),
            anotacoes: self.anotacoes.clone().unwrap_or_default(),
        }
    }

    fn publish(items: &[Self], refs: &mut References) {
        refs.animais = items.to_vec();
    }
}

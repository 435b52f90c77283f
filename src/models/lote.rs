// src/models/lote.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, masks};
use crate::models::{
    EntityForm, Resource, parsing::FieldParser, validate_not_negative, validate_positive,
};

// --- Lote: o registro como vem do backend ---
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lote {
    pub id: i64,
    pub numero_lote: String,
    // Diminui com perdas e vendas
    pub quantidade: i32,
    pub peso: Decimal,
    pub valor_individual: Decimal,
    #[serde(default)]
    pub idade_media: Decimal,
    #[serde(with = "dates::flexible")]
    pub data_compra: NaiveDate,
}

impl Lote {
    /// Valor do lote na compra (quantidade x valor por cabeça).
    pub fn valor_total(&self) -> Decimal {
        self.valor_individual * Decimal::from(self.quantidade)
    }
}

// --- Formulário (texto digitado, com máscaras) ---
#[derive(Debug, Clone, Default, Validate)]
pub struct LoteForm {
    #[validate(length(min = 1, message = "O número do lote é obrigatório."))]
    pub numero_lote: String,
    #[validate(length(min = 1, message = "A quantidade é obrigatória."))]
    pub quantidade: String,
    #[validate(length(min = 1, message = "O peso médio é obrigatório."))]
    pub peso: String,
    #[validate(length(min = 1, message = "O valor por cabeça é obrigatório."))]
    pub valor_individual: String,
    pub idade_media: String,
    #[validate(length(min = 1, message = "A data de compra é obrigatória."))]
    pub data_compra: String,
}

// --- Payload enviado no POST/PUT ---
#[derive(Debug, Clone, Serialize, Validate, PartialEq)]
pub struct LotePayload {
    pub numero_lote: String,
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantidade: i32,
    #[validate(custom(function = "validate_positive", message = "O peso deve ser maior que zero."))]
    pub peso: Decimal,
    #[validate(custom(function = "validate_positive", message = "O valor por cabeça deve ser maior que zero."))]
    pub valor_individual: Decimal,
    #[validate(custom(function = "validate_not_negative", message = "A idade média não pode ser negativa."))]
    pub idade_media: Decimal,
    #[serde(with = "dates::flexible")]
    pub data_compra: NaiveDate,
}

impl LotePayload {
    pub fn from_lote(lote: &Lote) -> Self {
        Self {
            numero_lote: lote.numero_lote.clone(),
            quantidade: lote.quantidade,
            peso: lote.peso,
            valor_individual: lote.valor_individual,
            idade_media: lote.idade_media,
            data_compra: lote.data_compra,
        }
    }
}

impl EntityForm for LoteForm {
    type Payload = LotePayload;

    fn to_payload(&self) -> Result<LotePayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = LotePayload {
            numero_lote: self.numero_lote.trim().to_string(),
            quantidade: p.int("quantidade", &self.quantidade, "A quantidade"),
            peso: p.decimal("peso", &self.peso, "O peso médio"),
            valor_individual: p.money("valor_individual", &self.valor_individual, "O valor por cabeça"),
            idade_media: if self.idade_media.trim().is_empty() {
                Decimal::ZERO
            } else {
                p.decimal("idade_media", &self.idade_media, "A idade média")
            },
            data_compra: p.date("data_compra", &self.data_compra, "A data de compra"),
        };
        p.finish(payload)
    }
}

impl Resource for Lote {
    const PATH: &'static str = "lote";
    const NOUN: &'static str = "lote";
    type Form = LoteForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        self.numero_lote.clone()
    }

    fn to_form(&self) -> LoteForm {
        LoteForm {
            numero_lote: self.numero_lote.clone(),
            quantidade: self.quantidade.to_string(),
            peso: self.peso.to_string(),
            valor_individual: masks::format_currency(self.valor_individual),
            idade_media: self.idade_media.to_string(),
            data_compra: self.data_compra.format("%Y-%m-%d").to_string(),
        }
    }
}

// Resposta de GET /api/lote/custo-por-cabeca
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustoPorCabeca {
    pub numero_lote: String,
    pub custo_por_cabeca: Decimal,
}

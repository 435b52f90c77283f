// src/models/racao.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, masks};
use crate::models::{EntityForm, Resource, parsing::FieldParser, validate_positive, validate_not_negative};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsumoRacao {
    pub id: i64,
    pub tipo_racao: String,
    pub quantidade_kg: Decimal,
    pub valor_estimado: Decimal,
    #[serde(with = "dates::flexible")]
    pub data_inicial: NaiveDate,
    #[serde(with = "dates::flexible")]
    pub data_final: NaiveDate,
}

impl ConsumoRacao {
    /// Consumo médio por dia no período (dias inclusivos).
    pub fn kg_por_dia(&self) -> Decimal {
        let dias = (self.data_final - self.data_inicial).num_days() + 1;
        if dias <= 0 {
            return Decimal::ZERO;
        }
        self.quantidade_kg / Decimal::from(dias)
    }
}

// Resposta de GET /api/alimentacao_ideal/:peso
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlimentacaoIdeal {
    pub peso: Decimal,
    pub consumo_diario_kg: Decimal,
    #[serde(default)]
    pub observacao: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ConsumoRacaoForm {
    #[validate(length(min = 1, message = "O tipo de ração é obrigatório."))]
    pub tipo_racao: String,
    #[validate(length(min = 1, message = "A quantidade em kg é obrigatória."))]
    pub quantidade_kg: String,
    pub valor_estimado: String,
    #[validate(length(min = 1, message = "A data inicial é obrigatória."))]
    pub data_inicial: String,
    #[validate(length(min = 1, message = "A data final é obrigatória."))]
    pub data_final: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct ConsumoRacaoPayload {
    pub tipo_racao: String,
    #[validate(custom(function = "validate_positive", message = "A quantidade deve ser maior que zero."))]
    pub quantidade_kg: Decimal,
    #[validate(custom(function = "validate_not_negative", message = "O valor estimado não pode ser negativo."))]
    pub valor_estimado: Decimal,
    #[serde(with = "dates::flexible")]
    pub data_inicial: NaiveDate,
    #[serde(with = "dates::flexible")]
    pub data_final: NaiveDate,
}

impl EntityForm for ConsumoRacaoForm {
    type Payload = ConsumoRacaoPayload;

    fn to_payload(&self) -> Result<ConsumoRacaoPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = ConsumoRacaoPayload {
            tipo_racao: self.tipo_racao.trim().to_string(),
            quantidade_kg: p.decimal("quantidade_kg", &self.quantidade_kg, "A quantidade em kg"),
            valor_estimado: if self.valor_estimado.trim().is_empty() {
                Decimal::ZERO
            } else {
                p.money("valor_estimado", &self.valor_estimado, "O valor estimado")
            },
            data_inicial: p.date("data_inicial", &self.data_inicial, "A data inicial"),
            data_final: p.date("data_final", &self.data_final, "A data final"),
        };

        if payload.data_final < payload.data_inicial {
            p.fail(
                "data_final",
                "periodo",
                "A data final não pode ser anterior à data inicial.",
            );
        }
        p.finish(payload)
    }
}

impl Resource for ConsumoRacao {
    const PATH: &'static str = "consumo_racao";
    const NOUN: &'static str = "consumo de ração";
    type Form = ConsumoRacaoForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        self.tipo_racao.clone()
    }

    fn to_form(&self) -> ConsumoRacaoForm {
        ConsumoRacaoForm {
            tipo_racao: self.tipo_racao.clone(),
            quantidade_kg: self.quantidade_kg.to_string(),
            valor_estimado: masks::format_currency(self.valor_estimado),
            data_inicial: self.data_inicial.format("%Y-%m-%d").to_string(),
            data_final: self.data_final.format("%Y-%m-%d").to_string(),
        }
    }
}

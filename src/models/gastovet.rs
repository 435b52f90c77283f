// src/models/gastovet.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, error::field_error, masks};
use crate::models::{
    EntityForm, References, Resource, check_lote_balance, parsing::FieldParser,
    validate_positive,
};

// Gasto veterinário/operacional
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GastoVet {
    pub id: i64,
    pub motivo_gasto: String,
    pub qtd_cabecas: i32,
    #[serde(with = "dates::flexible")]
    pub data_pagamento: NaiveDate,
    pub valor: Decimal,
    // Número do lote
    pub lote: String,
    // Alterado só pelas rotas /pago e /naopago
    #[serde(default)]
    pub pago: bool,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct GastoVetForm {
    #[validate(length(min = 1, message = "O motivo do gasto é obrigatório."))]
    pub motivo_gasto: String,
    #[validate(length(min = 1, message = "A quantidade de cabeças é obrigatória."))]
    pub qtd_cabecas: String,
    #[validate(length(min = 1, message = "A data de pagamento é obrigatória."))]
    pub data_pagamento: String,
    #[validate(length(min = 1, message = "O valor é obrigatório."))]
    pub valor: String,
    #[validate(length(min = 1, message = "Selecione o lote."))]
    pub lote: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct GastoVetPayload {
    pub motivo_gasto: String,
    #[validate(range(min = 1, message = "A quantidade de cabeças deve ser maior que zero."))]
    pub qtd_cabecas: i32,
    #[serde(with = "dates::flexible")]
    pub data_pagamento: NaiveDate,
    #[validate(custom(function = "validate_positive", message = "O valor deve ser maior que zero."))]
    pub valor: Decimal,
    pub lote: String,
}

impl EntityForm for GastoVetForm {
    type Payload = GastoVetPayload;

    fn to_payload(&self) -> Result<GastoVetPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = GastoVetPayload {
            motivo_gasto: self.motivo_gasto.trim().to_string(),
            qtd_cabecas: p.int("qtd_cabecas", &self.qtd_cabecas, "A quantidade de cabeças"),
            data_pagamento: p.date("data_pagamento", &self.data_pagamento, "A data de pagamento"),
            valor: p.money("valor", &self.valor, "O valor"),
            lote: self.lote.trim().to_string(),
        };
        p.finish(payload)
    }

    fn apply_references(
        &self,
        payload: &mut GastoVetPayload,
        refs: &References,
        _editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        let lote = refs
            .lote_by_numero(&payload.lote)
            .ok_or_else(|| field_error("lote", "lote", "O lote selecionado não existe."))?;
        check_lote_balance("qtd_cabecas", payload.qtd_cabecas, lote)
    }
}

impl Resource for GastoVet {
    const PATH: &'static str = "gastovet";
    const NOUN: &'static str = "gasto veterinário";
    const NEEDS_LOTES: bool = true;
    type Form = GastoVetForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.lote, self.motivo_gasto)
    }

    fn to_form(&self) -> GastoVetForm {
        GastoVetForm {
            motivo_gasto: self.motivo_gasto.clone(),
            qtd_cabecas: self.qtd_cabecas.to_string(),
            data_pagamento: self.data_pagamento.format("%Y-%m-%d").to_string(),
            valor: masks::format_currency(self.valor),
            lote: self.lote.clone(),
        }
    }
}

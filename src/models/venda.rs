// src/models/venda.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::api::backend::Attachment;
use crate::common::{dates, error::field_error, masks};
use crate::models::{
    EntityForm, References, Resource, check_lote_balance, parsing::FieldParser,
    validate_positive,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Venda {
    pub id: i64,
    pub lote_id: i64,
    pub numero_lote: String,
    pub comprador: String,
    // Só dígitos
    pub cpf_cnpj_comprador: String,
    pub valor_unitario: Decimal,
    pub quantidade_vendida: i32,
    #[serde(default, with = "dates::flexible_option")]
    pub prazo_pagamento: Option<NaiveDate>,
    #[serde(with = "dates::flexible")]
    pub data_compra: NaiveDate,
    // Alterado só pelas rotas /recebido e /naorecebido
    #[serde(default)]
    pub recebido: bool,
    #[serde(default)]
    pub documento: Option<String>,
}

impl Venda {
    pub fn valor_total(&self) -> Decimal {
        self.valor_unitario * Decimal::from(self.quantidade_vendida)
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct VendaForm {
    #[validate(length(min = 1, message = "Selecione o lote."))]
    pub lote_id: String,
    #[validate(length(min = 1, message = "O comprador é obrigatório."))]
    pub comprador: String,
    #[validate(length(min = 1, message = "O CPF/CNPJ do comprador é obrigatório."))]
    pub cpf_cnpj_comprador: String,
    #[validate(length(min = 1, message = "O valor unitário é obrigatório."))]
    pub valor_unitario: String,
    #[validate(length(min = 1, message = "A quantidade vendida é obrigatória."))]
    pub quantidade_vendida: String,
    pub prazo_pagamento: String,
    #[validate(length(min = 1, message = "A data da venda é obrigatória."))]
    pub data_compra: String,
    pub documento: Option<Attachment>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct VendaPayload {
    pub lote_id: i64,
    // Preenchido a partir do lote selecionado
    pub numero_lote: String,
    pub comprador: String,
    pub cpf_cnpj_comprador: String,
    #[validate(custom(function = "validate_positive", message = "O valor unitário deve ser maior que zero."))]
    pub valor_unitario: Decimal,
    #[validate(range(min = 1, message = "A quantidade vendida deve ser maior que zero."))]
    pub quantidade_vendida: i32,
    #[serde(with = "dates::flexible_option")]
    pub prazo_pagamento: Option<NaiveDate>,
    #[serde(with = "dates::flexible")]
    pub data_compra: NaiveDate,
}

impl EntityForm for VendaForm {
    type Payload = VendaPayload;

    fn to_payload(&self) -> Result<VendaPayload, ValidationErrors> {
        let mut p = FieldParser::new();

        let documento = masks::only_digits(&self.cpf_cnpj_comprador);
        if !masks::is_cpf_or_cnpj(&documento) {
            p.fail(
                "cpf_cnpj_comprador",
                "cpf_cnpj",
                "Informe um CPF (11 dígitos) ou CNPJ (14 dígitos).",
            );
        }

        let payload = VendaPayload {
            lote_id: p.id("lote_id", &self.lote_id, "o lote"),
            numero_lote: String::new(),
            comprador: self.comprador.trim().to_string(),
            cpf_cnpj_comprador: documento,
            valor_unitario: p.money("valor_unitario", &self.valor_unitario, "O valor unitário"),
            quantidade_vendida: p.int(
                "quantidade_vendida",
                &self.quantidade_vendida,
                "A quantidade vendida",
            ),
            prazo_pagamento: p.optional_date("prazo_pagamento", &self.prazo_pagamento, "O prazo de pagamento"),
            data_compra: p.date("data_compra", &self.data_compra, "A data da venda"),
        };
        p.finish(payload)
    }

    fn apply_references(
        &self,
        payload: &mut VendaPayload,
        refs: &References,
        editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        let lote = refs
            .lote_by_id(payload.lote_id)
            .ok_or_else(|| field_error("lote_id", "lote", "O lote selecionado não existe."))?;

        // Na edição, as cabeças da própria venda já saíram do saldo do lote
        let mut saldo = lote.clone();
        if let Some(original) = editing.and_then(|id| refs.venda_by_id(id)) {
            if original.lote_id == payload.lote_id {
                saldo.quantidade += original.quantidade_vendida;
            }
        }
        check_lote_balance("quantidade_vendida", payload.quantidade_vendida, &saldo)?;

        payload.numero_lote = lote.numero_lote.clone();
        Ok(())
    }

    fn attachment(&self) -> Option<Attachment> {
        self.documento.clone()
    }
}

impl Resource for Venda {
    const PATH: &'static str = "venda";
    const NOUN: &'static str = "venda";
    const NEEDS_LOTES: bool = true;
    const MULTIPART_FILE_FIELD: Option<&'static str> = Some("documento");
    type Form = VendaForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.numero_lote, self.comprador)
    }

    fn to_form(&self) -> VendaForm {
        VendaForm {
            lote_id: self.lote_id.to_string(),
            comprador: self.comprador.clone(),
            cpf_cnpj_comprador: masks::mask_cpf_cnpj(&self.cpf_cnpj_comprador),
            valor_unitario: masks::format_currency(self.valor_unitario),
            quantidade_vendida: self.quantidade_vendida.to_string(),
            prazo_pagamento: self
                .prazo_pagamento
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            data_compra: self.data_compra.format("%Y-%m-%d").to_string(),
            // O arquivo já enviado fica no servidor
            documento: None,
        }
    }
    fn publish(items: &[Self], refs: &mut References) {
        refs.vendas = items.to_vec();
    }
}

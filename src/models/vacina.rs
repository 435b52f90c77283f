// src/models/vacina.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, error::field_error};
use crate::models::{
    EntityForm, References, Resource, check_lote_balance, parsing::FieldParser,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vacina {
    pub id: i64,
    pub nome_vacina: String,
    #[serde(with = "dates::flexible")]
    pub data_aplicacao: NaiveDate,
    pub quantidade_cabecas: i32,
    pub numero_lote: String,
    // Lista de brincos separada por vírgula, não é uma relação
    #[serde(default)]
    pub numero_identificacao: String,
}

/// `"12, 15 ,,20"` -> `["12", "15", "20"]`
pub fn split_identificacoes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, Validate)]
pub struct VacinaForm {
    #[validate(length(min = 1, message = "O nome da vacina é obrigatório."))]
    pub nome_vacina: String,
    #[validate(length(min = 1, message = "A data de aplicação é obrigatória."))]
    pub data_aplicacao: String,
    #[validate(length(min = 1, message = "A quantidade de cabeças é obrigatória."))]
    pub quantidade_cabecas: String,
    #[validate(length(min = 1, message = "Selecione o lote."))]
    pub numero_lote: String,
    pub numero_identificacao: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct VacinaPayload {
    pub nome_vacina: String,
    #[serde(with = "dates::flexible")]
    pub data_aplicacao: NaiveDate,
    #[validate(range(min = 1, message = "A quantidade de cabeças deve ser maior que zero."))]
    pub quantidade_cabecas: i32,
    pub numero_lote: String,
    pub numero_identificacao: String,
}

impl EntityForm for VacinaForm {
    type Payload = VacinaPayload;

    fn to_payload(&self) -> Result<VacinaPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = VacinaPayload {
            nome_vacina: self.nome_vacina.trim().to_string(),
            data_aplicacao: p.date("data_aplicacao", &self.data_aplicacao, "A data de aplicação"),
            quantidade_cabecas: p.int(
                "quantidade_cabecas",
                &self.quantidade_cabecas,
                "A quantidade de cabeças",
            ),
            numero_lote: self.numero_lote.trim().to_string(),
            numero_identificacao: split_identificacoes(&self.numero_identificacao).join(","),
        };

        let listed = split_identificacoes(&payload.numero_identificacao).len();
        if listed > payload.quantidade_cabecas.max(0) as usize {
            p.fail(
                "numero_identificacao",
                "identificacoes",
                format!(
                    "Foram informadas {} identificações para {} cabeças.",
                    listed, payload.quantidade_cabecas
                ),
            );
        }
        p.finish(payload)
    }

    fn apply_references(
        &self,
        payload: &mut VacinaPayload,
        refs: &References,
        _editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        let lote = refs
            .lote_by_numero(&payload.numero_lote)
            .ok_or_else(|| field_error("numero_lote", "lote", "O lote selecionado não existe."))?;
        check_lote_balance("quantidade_cabecas", payload.quantidade_cabecas, lote)
    }
}

impl Resource for Vacina {
    const PATH: &'static str = "vacina";
    const NOUN: &'static str = "vacinação";
    const NEEDS_LOTES: bool = true;
    type Form = VacinaForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.numero_lote, self.nome_vacina)
    }

    fn to_form(&self) -> VacinaForm {
        VacinaForm {
            nome_vacina: self.nome_vacina.clone(),
            data_aplicacao: self.data_aplicacao.format("%Y-%m-%d").to_string(),
            quantidade_cabecas: self.quantidade_cabecas.to_string(),
            numero_lote: self.numero_lote.clone(),
            numero_identificacao: self.numero_identificacao.clone(),
        }
    }
}

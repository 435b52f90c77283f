// src/models/agendamento.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{dates, masks};
use crate::models::{EntityForm, Resource, parsing::FieldParser};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agendamento {
    pub id: i64,
    pub cpf: String,
    pub medico: String,
    #[serde(with = "dates::flexible")]
    pub data: NaiveDate,
    // HH:MM
    pub hora: String,
    pub local: String,
    pub telefone: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct AgendamentoForm {
    #[validate(length(min = 1, message = "O CPF do paciente é obrigatório."))]
    pub cpf: String,
    #[validate(length(min = 1, message = "Selecione o médico."))]
    pub medico: String,
    #[validate(length(min = 1, message = "A data é obrigatória."))]
    pub data: String,
    #[validate(length(min = 1, message = "A hora é obrigatória."))]
    pub hora: String,
    #[validate(length(min = 1, message = "O local é obrigatório."))]
    pub local: String,
    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub telefone: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct AgendamentoPayload {
    pub cpf: String,
    pub medico: String,
    #[serde(with = "dates::flexible")]
    pub data: NaiveDate,
    pub hora: String,
    pub local: String,
    #[validate(length(min = 10, max = 11, message = "O telefone deve ter DDD e 8 ou 9 dígitos."))]
    pub telefone: String,
}

impl EntityForm for AgendamentoForm {
    type Payload = AgendamentoPayload;

    fn to_payload(&self) -> Result<AgendamentoPayload, ValidationErrors> {
        let mut p = FieldParser::new();

        let cpf = masks::only_digits(&self.cpf);
        if !masks::is_cpf(&cpf) {
            p.fail("cpf", "cpf", "O CPF deve ter 11 dígitos.");
        }

        let hora = p.time("hora", &self.hora, "A hora");
        let payload = AgendamentoPayload {
            cpf,
            medico: self.medico.trim().to_string(),
            data: p.date("data", &self.data, "A data"),
            hora: hora.format("%H:%M").to_string(),
            local: self.local.trim().to_string(),
            telefone: masks::only_digits(&self.telefone),
        };
        p.finish(payload)
    }
}

impl Resource for Agendamento {
    const PATH: &'static str = "agendamento";
    const NOUN: &'static str = "agendamento";
    type Form = AgendamentoForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.cpf, self.medico, self.local)
    }

    fn to_form(&self) -> AgendamentoForm {
        AgendamentoForm {
            cpf: masks::mask_cpf(&self.cpf),
            medico: self.medico.clone(),
            data: self.data.format("%Y-%m-%d").to_string(),
            hora: self.hora.clone(),
            local: self.local.clone(),
            telefone: masks::mask_phone(&self.telefone),
        }
    }
}

// src/models/pessoas.rs

//! Cadastros de identidade: usuários do sistema, pacientes e médicos.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::common::{error::field_error, masks};
use crate::models::{EntityForm, References, Resource, parsing::{FieldParser, optional_text}};

fn check_cpf(p: &mut FieldParser, raw: &str) -> String {
    let cpf = masks::only_digits(raw);
    if !masks::is_cpf(&cpf) {
        p.fail("cpf", "cpf", "O CPF deve ter 11 dígitos.");
    }
    cpf
}

// --- Usuário ---
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub email: String,
    #[serde(default)]
    pub permissao: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UsuarioForm {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    pub cpf: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    pub permissao: String,
    // Obrigatória só no cadastro; vazia na edição mantém a atual
    pub senha: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct UsuarioPayload {
    pub nome: String,
    pub cpf: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub senha: Option<String>,
}

impl EntityForm for UsuarioForm {
    type Payload = UsuarioPayload;

    fn to_payload(&self) -> Result<UsuarioPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = UsuarioPayload {
            nome: self.nome.trim().to_string(),
            cpf: check_cpf(&mut p, &self.cpf),
            email: self.email.trim().to_lowercase(),
            permissao: optional_text(&self.permissao),
            senha: optional_text(&self.senha),
        };
        p.finish(payload)
    }

    fn apply_references(
        &self,
        payload: &mut UsuarioPayload,
        _refs: &References,
        editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        if editing.is_none() && payload.senha.is_none() {
            return Err(field_error("senha", "required", "A senha é obrigatória no cadastro."));
        }
        Ok(())
    }
}

impl Resource for Usuario {
    const PATH: &'static str = "usuario";
    const NOUN: &'static str = "usuário";
    type Form = UsuarioForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.nome, self.email)
    }

    fn to_form(&self) -> UsuarioForm {
        UsuarioForm {
            nome: self.nome.clone(),
            cpf: masks::mask_cpf(&self.cpf),
            email: self.email.clone(),
            permissao: self.permissao.clone().unwrap_or_default(),
            senha: String::new(),
        }
    }
}

// --- Paciente ---
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paciente {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct PacienteForm {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    pub cpf: String,
    #[validate(length(min = 1, message = "A idade é obrigatória."))]
    pub idade: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct PacientePayload {
    pub nome: String,
    pub cpf: String,
    #[validate(range(min = 0, max = 130, message = "Informe uma idade válida."))]
    pub idade: i32,
}

impl EntityForm for PacienteForm {
    type Payload = PacientePayload;

    fn to_payload(&self) -> Result<PacientePayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = PacientePayload {
            nome: self.nome.trim().to_string(),
            cpf: check_cpf(&mut p, &self.cpf),
            idade: p.int("idade", &self.idade, "A idade"),
        };
        p.finish(payload)
    }
}

impl Resource for Paciente {
    const PATH: &'static str = "paciente";
    const NOUN: &'static str = "paciente";
    type Form = PacienteForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.nome, self.cpf)
    }

    fn to_form(&self) -> PacienteForm {
        PacienteForm {
            nome: self.nome.clone(),
            cpf: masks::mask_cpf(&self.cpf),
            idade: self.idade.to_string(),
        }
    }
}

// --- Médico ---
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medico {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub profissao: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct MedicoForm {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
    #[validate(length(min = 1, message = "O CPF é obrigatório."))]
    pub cpf: String,
    #[validate(length(min = 1, message = "A profissão é obrigatória."))]
    pub profissao: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct MedicoPayload {
    pub nome: String,
    pub cpf: String,
    pub profissao: String,
}

impl EntityForm for MedicoForm {
    type Payload = MedicoPayload;

    fn to_payload(&self) -> Result<MedicoPayload, ValidationErrors> {
        let mut p = FieldParser::new();
        let payload = MedicoPayload {
            nome: self.nome.trim().to_string(),
            cpf: check_cpf(&mut p, &self.cpf),
            profissao: self.profissao.trim().to_string(),
        };
        p.finish(payload)
    }
}

impl Resource for Medico {
    const PATH: &'static str = "medico";
    const NOUN: &'static str = "médico";
    type Form = MedicoForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.nome, self.profissao)
    }

    fn to_form(&self) -> MedicoForm {
        MedicoForm {
            nome: self.nome.clone(),
            cpf: masks::mask_cpf(&self.cpf),
            profissao: self.profissao.clone(),
        }
    }
}

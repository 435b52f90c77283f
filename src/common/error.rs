// src/common/error.rs

use std::collections::HashMap;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::screens::notifications::Notification;

// Taxonomia de erros do cliente. Toda falha termina como um toast na tela.
#[derive(Debug, Error)]
pub enum AppError {
    // Validação feita no cliente, antes de qualquer requisição
    #[error("Erro de validação")]
    Validation(#[from] ValidationErrors),

    // 400/422 com erros por campo vindos do backend
    #[error("Requisição rejeitada: {message}")]
    Rejected {
        message: String,
        fields: HashMap<String, Vec<String>>,
    },

    #[error("Conflito: {0}")]
    Conflict(String),

    // Resposta 200 com flag de falha no corpo
    #[error("Operação recusada: {0}")]
    Business(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Sessão inválida ou expirada")]
    Unauthorized,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Registro não encontrado")]
    NotFound,

    #[error("Erro no servidor (HTTP {0})")]
    Server(u16),

    #[error("Falha de comunicação: {0}")]
    Network(#[from] reqwest::Error),

    // Resposta fora do formato esperado
    #[error("Resposta inválida do servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro ao gerar planilha: {0}")]
    Export(#[from] csv::Error),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Converte o erro na mensagem exibida ao usuário.
    pub fn to_notification(&self) -> Notification {
        let message = match self {
            AppError::Validation(errors) => {
                let details = field_messages(errors);
                if details.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    details.join(" ")
                }
            }
            AppError::Rejected { message, fields } => {
                let mut all: Vec<String> = fields.values().flatten().cloned().collect();
                all.sort();
                if all.is_empty() {
                    message.clone()
                } else {
                    all.join(" ")
                }
            }
            AppError::Conflict(message) if !message.is_empty() => message.clone(),
            AppError::Conflict(_) => "Registro já cadastrado.".to_string(),
            AppError::Business(message) => message.clone(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::Unauthorized => "Sessão expirada. Faça login novamente.".to_string(),
            AppError::Forbidden => "Você não tem permissão para esta ação.".to_string(),
            AppError::NotFound => "Registro não encontrado.".to_string(),
            AppError::Network(_) => "Não foi possível conectar ao servidor.".to_string(),

            // Os demais viram mensagem genérica; o detalhe fica no log.
            other => {
                tracing::error!("Erro interno: {}", other);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        Notification::error(message)
    }
}

/// Mensagens de todos os campos, em ordem de nome de campo.
pub fn field_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("Campo '{}' inválido.", field),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Monta um `ValidationError` com mensagem, no mesmo formato dos derivados.
pub fn validation_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into().into());
    err
}

/// Atalho para um `ValidationErrors` com um único campo.
pub fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, validation_error(code, message));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_notification_lists_field_messages() {
        let mut errors = field_error("quantidade", "range", "A quantidade deve ser maior que zero.");
        errors.add("comprador", validation_error("required", "O comprador é obrigatório."));

        let n = AppError::Validation(errors).to_notification();
        assert_eq!(
            n.message,
            "O comprador é obrigatório. A quantidade deve ser maior que zero."
        );
    }

    #[test]
    fn conflict_without_message_uses_default() {
        let n = AppError::Conflict(String::new()).to_notification();
        assert_eq!(n.message, "Registro já cadastrado.");
    }
}

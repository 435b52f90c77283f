// src/api/response.rs

//! Normaliza status + corpo em um único `Result`. O backend mistura
//! convenções: erros HTTP de verdade e respostas 200 com `success: false`.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::common::error::AppError;

const MESSAGE_KEYS: [&str; 4] = ["message", "mensagem", "error", "erro"];
const SUCCESS_KEYS: [&str; 2] = ["success", "sucesso"];

fn message_of(body: &Value) -> Option<String> {
    let obj = body.as_object()?;
    MESSAGE_KEYS
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn field_errors_of(body: &Value) -> HashMap<String, Vec<String>> {
    let mut fields = HashMap::new();
    let Some(obj) = body.as_object() else {
        return fields;
    };
    let source: Option<&Map<String, Value>> = obj
        .get("errors")
        .or_else(|| obj.get("details"))
        .and_then(Value::as_object);

    for (field, value) in source.into_iter().flatten() {
        let messages = match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        if !messages.is_empty() {
            fields.insert(field.clone(), messages);
        }
    }
    fields
}

fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    // Alguns endpoints respondem texto puro ("OK")
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

pub fn normalize(status: u16, text: &str) -> Result<Value, AppError> {
    let body = parse_body(text);

    match status {
        200..=299 => {
            let failed = body.as_object().is_some_and(|obj| {
                SUCCESS_KEYS
                    .iter()
                    .any(|k| obj.get(*k).and_then(Value::as_bool) == Some(false))
            });
            if failed {
                let message =
                    message_of(&body).unwrap_or_else(|| "A operação não foi concluída.".to_string());
                return Err(AppError::Business(message));
            }
            Ok(body)
        }
        401 => Err(AppError::Unauthorized),
        403 => Err(AppError::Forbidden),
        404 => Err(AppError::NotFound),
        409 => Err(AppError::Conflict(message_of(&body).unwrap_or_default())),
        400..=499 => Err(AppError::Rejected {
            message: message_of(&body)
                .unwrap_or_else(|| "Um ou mais campos são inválidos.".to_string()),
            fields: field_errors_of(&body),
        }),
        other => Err(AppError::Server(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_flag_false_is_a_business_error() {
        let err = normalize(200, r#"{"success": false, "message": "Lote sem saldo"}"#).unwrap_err();
        assert!(matches!(err, AppError::Business(m) if m == "Lote sem saldo"));
    }

    #[test]
    fn plain_success_passes_body_through() {
        let body = normalize(201, r#"{"id": 9}"#).unwrap();
        assert_eq!(body["id"], 9);
        assert_eq!(normalize(204, "").unwrap(), Value::Null);
        assert_eq!(normalize(200, "OK").unwrap(), Value::String("OK".into()));
    }

    #[test]
    fn field_errors_are_collected_from_details() {
        let err = normalize(
            400,
            r#"{"error": "Um ou mais campos são inválidos.", "details": {"email": ["E-mail inválido."]}}"#,
        )
        .unwrap_err();
        match err {
            AppError::Rejected { fields, .. } => {
                assert_eq!(fields["email"], vec!["E-mail inválido.".to_string()]);
            }
            other => panic!("esperava Rejected, veio {:?}", other),
        }
    }

    #[test]
    fn conflict_keeps_backend_message() {
        let err = normalize(409, r#"{"erro": "CPF já cadastrado"}"#).unwrap_err();
        assert!(matches!(err, AppError::Conflict(m) if m == "CPF já cadastrado"));
        assert!(matches!(normalize(503, "").unwrap_err(), AppError::Server(503)));
    }
}

// src/api/backend.rs

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::common::error::AppError;

// Arquivo enviado junto com um formulário (ex.: documento da venda)
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, Attachment)>,
    },
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, AppError> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    /// Achata um payload em campos de texto de formulário multipart.
    /// `null` é omitido; números e booleanos viram texto.
    pub fn multipart<T: Serialize>(
        value: &T,
        file_field: &str,
        file: Option<Attachment>,
    ) -> Result<Self, AppError> {
        let fields = match serde_json::to_value(value)? {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    Value::Null => None,
                    Value::String(s) => Some((k, s)),
                    other => Some((k, other.to_string())),
                })
                .collect(),
            _ => Vec::new(),
        };
        let files = file
            .map(|a| vec![(file_field.to_string(), a)])
            .unwrap_or_default();
        Ok(RequestBody::Multipart { fields, files })
    }
}

/// A única porta de saída para o backend REST. Toda resposta já chega
/// normalizada: sucesso é `Ok(corpo)`, qualquer falha é um `AppError`.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Value, AppError>;

    async fn get(&self, path: &str) -> Result<Value, AppError> {
        self.send(Method::GET, path, RequestBody::Empty).await
    }
}

// src/api/http.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, multipart};
use serde_json::Value;

use crate::{
    api::{
        backend::{Backend, RequestBody},
        response,
    },
    common::error::AppError,
    services::auth::Session,
};

// Cliente da API REST. O token da sessão vai como Bearer em toda requisição.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        session: Session,
    ) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        // Sem timeout por padrão, igual ao painel web
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, method: Method, path: &str, body: RequestBody) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("➡️ {} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart { fields, files } => {
                let mut form = multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for (name, file) in files {
                    let part = multipart::Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.mime)?;
                    form = form.part(name, part);
                }
                request.multipart(form)
            }
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("🔥 Falha de rede em {} {}: {}", method, url, e);
            AppError::Network(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!("⬅️ {} {} -> {}", method, url, status);

        response::normalize(status, &text)
    }
}

// src/services/auth.rs

use std::sync::{Arc, RwLock};

use reqwest::Method;
use validator::Validate;

use crate::{
    api::{
        backend::{Backend, RequestBody},
        resources::parse,
    },
    common::error::AppError,
    models::auth::{AuthResponse, LoginPayload},
    services::token,
};

// O "cookie" da sessão: guarda o token emitido pelo backend.
// Clones compartilham o mesmo token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set(token.into());
        session
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn set(&self, token: String) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub fn is_valid(&self) -> bool {
        token::session_is_valid(self.token().as_deref())
    }
}

#[derive(Clone)]
pub struct AuthService {
    backend: Arc<dyn Backend>,
    session: Session,
}

impl AuthService {
    pub fn new(backend: Arc<dyn Backend>, session: Session) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn login_user(&self, email: &str, senha: &str) -> Result<String, AppError> {
        let payload = LoginPayload {
            email: email.trim().to_string(),
            senha: senha.to_string(),
        };
        payload.validate()?;

        let body = self
            .backend
            .send(Method::POST, "/api/login", RequestBody::json(&payload)?)
            .await
            .map_err(|e| match e {
                AppError::Unauthorized | AppError::NotFound => AppError::InvalidCredentials,
                other => other,
            })?;

        let AuthResponse { token } = parse(body)?;

        // Token recém-emitido que já nasce inválido não entra na sessão
        if token::is_token_expired(Some(&token)) {
            tracing::warn!("Backend devolveu um token ilegível ou expirado.");
            return Err(AppError::Unauthorized);
        }

        self.session.set(token.clone());
        tracing::info!("✅ Login realizado para {}", payload.email);
        Ok(token)
    }

    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("Sessão encerrada.");
    }
}

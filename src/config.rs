// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use crate::{
    api::{backend::Backend, http::HttpBackend},
    common::error::AppError,
    services::auth::{AuthService, Session},
};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    // Sem valor = sem timeout
    pub api_timeout: Option<Duration>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub export_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Lê o ambiente (e o `.env`, se existir).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = non_empty("AGROBOV_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "AGROBOV_API_URL deve começar com http:// ou https:// (recebido: {})",
                api_url
            )));
        }

        let api_timeout = match non_empty("AGROBOV_API_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!(
                        "AGROBOV_API_TIMEOUT_SECS deve ser um número de segundos (recebido: {})",
                        raw
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            api_url,
            api_timeout,
            token: non_empty("AGROBOV_TOKEN"),
            email: non_empty("AGROBOV_EMAIL"),
            senha: non_empty("AGROBOV_SENHA"),
            export_dir: non_empty("AGROBOV_EXPORT_DIR").map(PathBuf::from),
        })
    }
}

// O estado compartilhado pelas telas
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: Session,
    pub backend: Arc<dyn Backend>,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let session = match &config.token {
            Some(token) => Session::with_token(token.clone()),
            None => Session::new(),
        };

        let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(
            &config.api_url,
            config.api_timeout,
            session.clone(),
        )?);
        tracing::info!("✅ Cliente da API configurado para {}", config.api_url);

        // --- Monta o gráfico de dependências ---
        let auth_service = AuthService::new(backend.clone(), session.clone());

        Ok(Self {
            config,
            session,
            backend,
            auth_service,
        })
    }
}

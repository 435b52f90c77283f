// src/services/token.rs

//! Leitura local do token de sessão. O cliente não tem a chave de
//! assinatura, então só decodifica as claims. Política única: sem token
//! ou token ilegível sempre nega (expirado / sem permissão).

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::decode_header;

use crate::{common::error::AppError, models::auth::Claims};

/// Lê as claims do segmento do meio, seja qual for o algoritmo (HS256,
/// RS256...). A assinatura não é conferida.
pub fn decode_claims(token: &str) -> Result<Claims, AppError> {
    let unreadable = |reason: &dyn std::fmt::Display| {
        tracing::debug!("Token ilegível: {}", reason);
        AppError::Unauthorized
    };

    // O cabeçalho precisa ser um JWT válido
    decode_header(token).map_err(|e| unreadable(&e))?;

    let mut segments = token.trim().split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(unreadable(&"esperados três segmentos"));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| unreadable(&e))?;
    serde_json::from_slice::<Claims>(&bytes).map_err(|e| unreadable(&e))
}

pub fn is_token_expired_at(token: Option<&str>, now: DateTime<Utc>) -> bool {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return true;
    };
    match decode_claims(token) {
        Err(_) => true,
        Ok(claims) => match claims.exp {
            // Sem claim de expiração: não expira
            None => false,
            Some(exp) => exp <= now.timestamp(),
        },
    }
}

pub fn is_token_expired(token: Option<&str>) -> bool {
    is_token_expired_at(token, Utc::now())
}

pub fn session_is_valid(token: Option<&str>) -> bool {
    !is_token_expired(token)
}

/// O papel do token está entre os permitidos? Sem token, nega.
pub fn has_permission(token: Option<&str>, allowed: &[&str]) -> bool {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return false;
    };
    match decode_claims(token) {
        Ok(claims) => claims.role().is_some_and(|role| allowed.contains(&role)),
        Err(_) => false,
    }
}

/// Papel do token, quando legível.
pub fn role_of(token: &str) -> Option<String> {
    decode_claims(token).ok()?.role().map(str::to_string)
}

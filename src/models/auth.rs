// src/models/auth.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// Dados para login
#[derive(Debug, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub senha: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

// Claims lidas do token. Nada aqui é validado por assinatura:
// o cliente só decodifica para decidir o que mostrar.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<Value>,
    // Expiração em segundos desde a época
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    // Papel único usado para liberar itens do menu
    #[serde(default, alias = "permission")]
    pub permissao: Option<Value>,
}

impl Claims {
    /// O papel, quando a claim é de fato uma string.
    pub fn role(&self) -> Option<&str> {
        self.permissao.as_ref().and_then(Value::as_str)
    }
}

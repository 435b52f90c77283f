// src/screens/shell.rs

//! Moldura das páginas autenticadas: barra de navegação com itens
//! liberados pelo papel gravado no token.

use crate::{common::error::AppError, services::token};

pub const ADMIN: &str = "admin";
pub const VISITANTE: &str = "visitante";

const TODOS: &[&str] = &[ADMIN, VISITANTE];
const SO_ADMIN: &[&str] = &[ADMIN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: &'static str,
    pub roles: &'static [&'static str],
}

pub const MENU: &[MenuItem] = &[
    MenuItem { label: "Painel", route: "/dashboard", roles: TODOS },
    MenuItem { label: "Lotes", route: "/lotes", roles: TODOS },
    MenuItem { label: "Animais", route: "/animais", roles: TODOS },
    MenuItem { label: "Vacinação", route: "/vacinas", roles: TODOS },
    MenuItem { label: "Consumo de ração", route: "/racao", roles: TODOS },
    MenuItem { label: "Gastos veterinários", route: "/gastos", roles: SO_ADMIN },
    MenuItem { label: "Vendas", route: "/vendas", roles: SO_ADMIN },
    MenuItem { label: "Agendamentos", route: "/agendamentos", roles: TODOS },
    MenuItem { label: "Pacientes", route: "/pacientes", roles: SO_ADMIN },
    MenuItem { label: "Médicos", route: "/medicos", roles: SO_ADMIN },
    MenuItem { label: "Usuários", route: "/usuarios", roles: SO_ADMIN },
];

/// Barreira de toda página autenticada: sem token ou token vencido, volta ao login.
pub fn guard(token: Option<&str>) -> Result<(), AppError> {
    if token::is_token_expired(token) {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

pub fn visible_menu(token: Option<&str>) -> Vec<&'static MenuItem> {
    if guard(token).is_err() {
        return Vec::new();
    }
    MENU.iter()
        .filter(|item| token::has_permission(token, item.roles))
        .collect()
}

/// Acesso direto a uma rota (ex.: URL digitada).
pub fn can_access(route: &str, token: Option<&str>) -> Result<(), AppError> {
    guard(token)?;
    let item = MENU
        .iter()
        .find(|item| item.route == route)
        .ok_or(AppError::NotFound)?;
    if token::has_permission(token, item.roles) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

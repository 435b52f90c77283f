// src/common/masks.rs

//! Máscaras de digitação (CPF, CNPJ, telefone, moeda) e a remoção delas
//! antes do envio. Todas as funções são puras e aceitam entrada parcial,
//! pois são aplicadas a cada tecla.

use rust_decimal::{Decimal, RoundingStrategy};

const CPF_PATTERN: &str = "###.###.###-##";
const CNPJ_PATTERN: &str = "##.###.###/####-##";
const PHONE_PATTERN: &str = "(##) ####-####";
const MOBILE_PATTERN: &str = "(##) #####-####";

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;

/// Mantém apenas os dígitos ASCII.
pub fn only_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

// Encaixa os dígitos no padrão, parando no último dígito disponível
// (sem literal pendurado no final durante a digitação).
fn apply_pattern(digits: &str, pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = digits.chars().peekable();

    for slot in pattern.chars() {
        if chars.peek().is_none() {
            break;
        }
        if slot == '#' {
            if let Some(d) = chars.next() {
                out.push(d);
            }
        } else {
            out.push(slot);
        }
    }
    out
}

pub fn mask_cpf(input: &str) -> String {
    let digits: String = only_digits(input).chars().take(CPF_LEN).collect();
    apply_pattern(&digits, CPF_PATTERN)
}

pub fn mask_cnpj(input: &str) -> String {
    let digits: String = only_digits(input).chars().take(CNPJ_LEN).collect();
    apply_pattern(&digits, CNPJ_PATTERN)
}

/// CPF até 11 dígitos, CNPJ a partir do 12º.
pub fn mask_cpf_cnpj(input: &str) -> String {
    if only_digits(input).len() <= CPF_LEN {
        mask_cpf(input)
    } else {
        mask_cnpj(input)
    }
}

pub fn mask_phone(input: &str) -> String {
    let digits: String = only_digits(input).chars().take(11).collect();
    if digits.len() <= 10 {
        apply_pattern(&digits, PHONE_PATTERN)
    } else {
        apply_pattern(&digits, MOBILE_PATTERN)
    }
}

pub fn is_cpf(input: &str) -> bool {
    only_digits(input).len() == CPF_LEN
}

pub fn is_cpf_or_cnpj(input: &str) -> bool {
    let len = only_digits(input).len();
    len == CPF_LEN || len == CNPJ_LEN
}

/// Máscara de moeda sobre a digitação: os dígitos são centavos.
/// `"150075"` vira `"R$ 1.500,75"`.
pub fn mask_currency(input: &str) -> String {
    match parse_currency(input) {
        Some(value) => format_currency(value),
        None => String::new(),
    }
}

/// Regra canônica de leitura: todos os dígitos do texto são centavos,
/// divididos por 100 uma única vez. Inverso exato de `mask_currency`.
pub fn parse_currency(input: &str) -> Option<Decimal> {
    let digits = only_digits(input);
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    // i64 comporta 18 dígitos com folga
    if trimmed.len() > 18 {
        return None;
    }
    let cents: i64 = if trimmed.is_empty() { 0 } else { trimmed.parse().ok()? };
    let negative = input.trim_start().starts_with('-');
    let value = Decimal::new(cents, 2);
    Some(if negative { -value } else { value })
}

/// Formata um valor em reais: `R$ 1.500,75`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

/// Lê números digitados no padrão brasileiro (`1.234,5`) ou com ponto (`1234.5`).
/// Usado para peso e quantidades em kg, que não passam pela máscara de moeda.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let cleaned: String = input.trim().chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<Decimal>().ok()
}

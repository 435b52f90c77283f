// src/models.rs

use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::backend::Attachment;

pub mod agendamento;
pub mod animal;
pub mod auth;
pub mod dashboard;
pub mod gastovet;
pub mod lote;
pub mod parsing;
pub mod pessoas;
pub mod racao;
pub mod vacina;
pub mod venda;

use animal::Animal;
use lote::Lote;
use venda::Venda;

// ---
// Contrato de um recurso REST com tela de cadastro
// ---
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Segmento da rota: `lote` vira `/api/lote`.
    const PATH: &'static str;

    /// Nome usado nas notificações ("lote", "venda"...).
    const NOUN: &'static str;

    /// A tela precisa da lista de lotes para as checagens de saldo.
    const NEEDS_LOTES: bool = false;

    /// Campo do arquivo quando o envio é sempre multipart.
    const MULTIPART_FILE_FIELD: Option<&'static str> = None;

    type Form: EntityForm;

    fn id(&self) -> i64;

    /// Texto usado pelo filtro local da listagem.
    fn search_text(&self) -> String;

    /// Preenche o formulário no modo de edição.
    fn to_form(&self) -> Self::Form;

    /// Expõe a própria lista nas referências (ex.: brincos já usados).
    fn publish(_items: &[Self], _refs: &mut References) {}
}

// ---
// Formulário controlado: texto digitado -> payload tipado
// ---
pub trait EntityForm: Validate + Default + Clone + Send + Sync {
    type Payload: Serialize + Validate + Send + Sync;

    /// Remove máscaras e converte os campos numéricos e de data.
    fn to_payload(&self) -> Result<Self::Payload, ValidationErrors>;

    /// Checagens contra listas já carregadas (ex.: saldo do lote).
    /// Também pode completar campos derivados do registro referenciado.
    fn apply_references(
        &self,
        _payload: &mut Self::Payload,
        _refs: &References,
        _editing: Option<i64>,
    ) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Arquivo anexado; quando presente o envio é multipart.
    fn attachment(&self) -> Option<Attachment> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct References {
    pub lotes: Vec<Lote>,
    pub animais: Vec<Animal>,
    pub vendas: Vec<Venda>,
}

impl References {
    pub fn lote_by_id(&self, id: i64) -> Option<&Lote> {
        self.lotes.iter().find(|l| l.id == id)
    }

    pub fn lote_by_numero(&self, numero: &str) -> Option<&Lote> {
        let numero = numero.trim();
        self.lotes.iter().find(|l| l.numero_lote.trim() == numero)
    }

    pub fn venda_by_id(&self, id: i64) -> Option<&Venda> {
        self.vendas.iter().find(|v| v.id == id)
    }
}

// ---
// Validações customizadas de Decimal
// ---
pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

/// Verifica se `quantidade` cabe no saldo do lote referenciado.
pub(crate) fn check_lote_balance(
    field: &'static str,
    quantidade: i32,
    lote: &Lote,
) -> Result<(), ValidationErrors> {
    if quantidade > lote.quantidade {
        return Err(crate::common::error::field_error(
            field,
            "saldo_lote",
            format!(
                "A quantidade ({}) excede o disponível no lote {} ({}).",
                quantidade, lote.numero_lote, lote.quantidade
            ),
        ));
    }
    Ok(())
}

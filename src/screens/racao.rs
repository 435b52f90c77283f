// src/screens/racao.rs

use crate::{
    api::reports,
    common::{
        error::{AppError, field_error},
        masks,
    },
    models::racao::{AlimentacaoIdeal, ConsumoRacao},
    screens::crud::CrudScreen,
};

impl CrudScreen<ConsumoRacao> {
    /// Consumo ideal de ração para um peso vivo digitado pelo usuário.
    pub async fn ideal_feed(&mut self, peso: &str) -> Result<AlimentacaoIdeal, AppError> {
        let peso = match masks::parse_decimal(peso) {
            Some(p) if p > rust_decimal::Decimal::ZERO => p,
            _ => {
                return self.surface(Err(field_error(
                    "peso",
                    "range",
                    "Informe um peso maior que zero.",
                )
                .into()));
            }
        };
        let result = reports::alimentacao_ideal(self.backend.as_ref(), peso).await;
        self.surface(result)
    }
}

// src/screens/animal.rs

use crate::{
    api::reports,
    common::error::{AppError, field_error},
    models::animal::{Animal, Pesagem},
    screens::crud::CrudScreen,
};

impl CrudScreen<Animal> {
    /// Histórico de pesagens pelo número do brinco, da mais antiga à mais recente.
    pub async fn weight_history(&mut self, numero_identificacao: &str) -> Result<Vec<Pesagem>, AppError> {
        if numero_identificacao.trim().is_empty() {
            return self.surface(Err(field_error(
                "numero_identificacao",
                "required",
                "Informe o número de identificação.",
            )
            .into()));
        }
        let result = reports::historico_pesagens(self.backend.as_ref(), numero_identificacao).await;
        self.surface(result)
    }
}

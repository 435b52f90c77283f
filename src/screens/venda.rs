// src/screens/venda.rs

use rust_decimal::Decimal;

use crate::{
    api::reports,
    common::error::AppError,
    models::venda::Venda,
    screens::{crud::CrudScreen, notifications::Notification},
    services::dashboard_service,
};

impl CrudScreen<Venda> {
    /// Marca como recebida / não recebida pelas rotas próprias.
    pub async fn set_received(&mut self, id: i64, recebido: bool) -> Result<(), AppError> {
        let result = match self.find(id) {
            Some(_) => reports::set_venda_recebida(self.backend.as_ref(), id, recebido).await,
            None => Err(AppError::NotFound),
        };
        self.surface(result)?;

        let message = if recebido {
            "Venda marcada como recebida."
        } else {
            "Venda marcada como não recebida."
        };
        self.notifier.push(Notification::success(message));
        self.reload_after_mutation().await;
        Ok(())
    }

    pub fn receivables(&self) -> Decimal {
        dashboard_service::a_receber(&self.items)
    }
}

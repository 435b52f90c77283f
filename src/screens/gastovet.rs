// src/screens/gastovet.rs

use crate::{
    api::reports,
    common::error::AppError,
    models::{dashboard::GastosSummary, gastovet::GastoVet},
    screens::{crud::CrudScreen, notifications::Notification},
    services::dashboard_service,
};

impl CrudScreen<GastoVet> {
    /// Marca como pago / não pago pelas rotas próprias (não pelo PUT genérico).
    pub async fn set_paid(&mut self, id: i64, pago: bool) -> Result<(), AppError> {
        let result = match self.find(id) {
            Some(_) => reports::set_gasto_pago(self.backend.as_ref(), id, pago).await,
            None => Err(AppError::NotFound),
        };
        self.surface(result)?;

        let message = if pago {
            "Gasto marcado como pago."
        } else {
            "Gasto marcado como não pago."
        };
        self.notifier.push(Notification::success(message));
        self.reload_after_mutation().await;
        Ok(())
    }

    pub fn summary(&self) -> GastosSummary {
        dashboard_service::gastos_summary(&self.items)
    }
}

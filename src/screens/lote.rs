// src/screens/lote.rs

use crate::{
    api::{
        backend::RequestBody,
        reports,
        resources,
    },
    common::error::{AppError, field_error},
    models::lote::{CustoPorCabeca, Lote, LotePayload},
    screens::{crud::CrudScreen, notifications::Notification},
};

impl CrudScreen<Lote> {
    /// Registra a perda de cabeças: abate `quantidade` do saldo do lote
    /// com um PUT do registro completo.
    pub async fn register_loss(&mut self, id: i64, quantidade: i32) -> Result<(), AppError> {
        let result = self.send_loss(id, quantidade).await;
        let lote = self.surface(result)?;

        let message = format!(
            "Perda de {} cabeça(s) registrada no lote {}.",
            quantidade, lote.numero_lote
        );
        tracing::info!("✅ {}", message);
        self.notifier.push(Notification::success(message));

        self.reload_after_mutation().await;
        Ok(())
    }

    async fn send_loss(&self, id: i64, quantidade: i32) -> Result<Lote, AppError> {
        let lote = self.find(id).cloned().ok_or(AppError::NotFound)?;

        if quantidade <= 0 {
            return Err(field_error(
                "quantidade",
                "range",
                "A quantidade perdida deve ser maior que zero.",
            )
            .into());
        }
        if quantidade > lote.quantidade {
            return Err(field_error(
                "quantidade",
                "saldo_lote",
                format!(
                    "A quantidade ({}) excede o disponível no lote {} ({}).",
                    quantidade, lote.numero_lote, lote.quantidade
                ),
            )
            .into());
        }

        let mut payload = LotePayload::from_lote(&lote);
        payload.quantidade = lote.quantidade - quantidade;

        resources::update::<Lote>(self.backend.as_ref(), id, RequestBody::json(&payload)?).await?;
        Ok(lote)
    }

    pub async fn cost_per_head(&mut self) -> Result<Vec<CustoPorCabeca>, AppError> {
        let result = reports::custo_por_cabeca(self.backend.as_ref()).await;
        self.surface(result)
    }
}

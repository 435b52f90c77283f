// src/screens/dashboard.rs

use std::sync::Arc;

use crate::{
    api::{backend::Backend, reports, resources},
    common::error::AppError,
    models::{
        dashboard::{DashboardSummary, RelatorioLote},
        lote::Lote,
        venda::Venda,
    },
    screens::notifications::{Notification, Notifier},
    services::dashboard_service,
};

// Painel: três buscas independentes, exibidas só quando todas chegam.
pub struct DashboardScreen {
    backend: Arc<dyn Backend>,
    lotes: Vec<Lote>,
    relatorio: Vec<RelatorioLote>,
    vendas: Vec<Venda>,
    summary: Option<DashboardSummary>,
    notifier: Notifier,
}

impl DashboardScreen {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            lotes: Vec::new(),
            relatorio: Vec::new(),
            vendas: Vec::new(),
            summary: None,
            notifier: Notifier::default(),
        }
    }

    /// Busca lotes, relatório e vendas em paralelo. Se qualquer uma falhar,
    /// o resumo anterior continua na tela.
    pub async fn load(&mut self) -> Result<&DashboardSummary, AppError> {
        let backend = self.backend.as_ref();
        let result = tokio::try_join!(
            resources::list::<Lote>(backend),
            reports::relatorio(backend),
            resources::list::<Venda>(backend),
        );

        let (lotes, relatorio, vendas) = match result {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao carregar o painel: {}", e);
                self.notifier.push(e.to_notification());
                return Err(e);
            }
        };

        let summary = dashboard_service::summarize(&lotes, &relatorio, &vendas);
        tracing::info!(
            "📊 Painel: {} lotes, {} cabeças, lucro {}",
            summary.total_lotes,
            summary.total_cabecas,
            summary.lucro_total
        );

        self.lotes = lotes;
        self.relatorio = relatorio;
        self.vendas = vendas;
        Ok(self.summary.insert(summary))
    }

    pub fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    pub fn lotes(&self) -> &[Lote] {
        &self.lotes
    }

    pub fn relatorio(&self) -> &[RelatorioLote] {
        &self.relatorio
    }

    pub fn vendas(&self) -> &[Venda] {
        &self.vendas
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifier.take()
    }
}

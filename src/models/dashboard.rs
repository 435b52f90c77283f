// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Linha de GET /api/relatorio (resultado por lote)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatorioLote {
    pub numero_lote: String,
    #[serde(default)]
    pub total_gastos: Decimal,
    #[serde(default)]
    pub total_vendas: Decimal,
    pub lucro: Decimal,
}

// Os cards do topo do painel
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_lotes: usize,
    pub total_cabecas: i64,
    pub lucro_total: Decimal,
    // Vendas ainda não recebidas (valor unitário x quantidade)
    pub a_receber: Decimal,
    pub vendas_total: Decimal,
}

// Totais da tela de gastos
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GastosSummary {
    pub total: Decimal,
    pub pendente: Decimal,
    pub pago: Decimal,
}

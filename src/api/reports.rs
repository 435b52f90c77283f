// src/api/reports.rs

//! Rotas fora do CRUD padrão: alternância de status e relatórios calculados
//! no backend.

use reqwest::Method;
use rust_decimal::Decimal;

use crate::{
    api::{
        backend::{Backend, RequestBody},
        resources::{item_path, parse, parse_list},
    },
    common::error::AppError,
    models::{
        animal::Pesagem,
        dashboard::RelatorioLote,
        gastovet::GastoVet,
        lote::CustoPorCabeca,
        racao::AlimentacaoIdeal,
        venda::Venda,
    },
};

// PUT /api/gastovet/:id/pago | /naopago
pub async fn set_gasto_pago(backend: &dyn Backend, id: i64, pago: bool) -> Result<(), AppError> {
    let action = if pago { "pago" } else { "naopago" };
    let path = format!("{}/{}", item_path::<GastoVet>(id), action);
    backend.send(Method::PUT, &path, RequestBody::Empty).await?;
    Ok(())
}

// PUT /api/venda/:id/recebido | /naorecebido
pub async fn set_venda_recebida(
    backend: &dyn Backend,
    id: i64,
    recebido: bool,
) -> Result<(), AppError> {
    let action = if recebido { "recebido" } else { "naorecebido" };
    let path = format!("{}/{}", item_path::<Venda>(id), action);
    backend.send(Method::PUT, &path, RequestBody::Empty).await?;
    Ok(())
}

// GET /api/lote/custo-por-cabeca
pub async fn custo_por_cabeca(backend: &dyn Backend) -> Result<Vec<CustoPorCabeca>, AppError> {
    parse_list(backend.get("/api/lote/custo-por-cabeca").await?)
}

// GET /api/relatorio
pub async fn relatorio(backend: &dyn Backend) -> Result<Vec<RelatorioLote>, AppError> {
    parse_list(backend.get("/api/relatorio").await?)
}

// GET /api/alimentacao_ideal/:peso
pub async fn alimentacao_ideal(
    backend: &dyn Backend,
    peso: Decimal,
) -> Result<AlimentacaoIdeal, AppError> {
    let path = format!("/api/alimentacao_ideal/{}", peso.normalize());
    parse(backend.get(&path).await?)
}

// GET /api/animal/historico/:numero_identificacao
pub async fn historico_pesagens(
    backend: &dyn Backend,
    numero_identificacao: &str,
) -> Result<Vec<Pesagem>, AppError> {
    let path = format!(
        "/api/animal/historico/{}",
        urlencoding::encode(numero_identificacao.trim())
    );
    let mut pesagens: Vec<Pesagem> = parse_list(backend.get(&path).await?)?;
    pesagens.sort_by_key(|p| p.data);
    Ok(pesagens)
}

// src/services/dashboard_service.rs

//! Agregados do painel. Funções puras, recalculadas a cada busca.

use rust_decimal::Decimal;

use crate::models::{
    dashboard::{DashboardSummary, GastosSummary, RelatorioLote},
    gastovet::GastoVet,
    lote::Lote,
    venda::Venda,
};

pub fn total_cabecas(lotes: &[Lote]) -> i64 {
    lotes.iter().map(|l| i64::from(l.quantidade)).sum()
}

pub fn lucro_total(relatorio: &[RelatorioLote]) -> Decimal {
    relatorio.iter().map(|r| r.lucro).sum()
}

/// Soma de valor unitário x quantidade das vendas ainda não recebidas.
pub fn a_receber(vendas: &[Venda]) -> Decimal {
    vendas
        .iter()
        .filter(|v| !v.recebido)
        .map(Venda::valor_total)
        .sum()
}

pub fn summarize(lotes: &[Lote], relatorio: &[RelatorioLote], vendas: &[Venda]) -> DashboardSummary {
    let (vendas_total, a_receber) =
        vendas
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(total, pendente), v| {
                let valor = v.valor_total();
                if v.recebido {
                    (total + valor, pendente)
                } else {
                    (total + valor, pendente + valor)
                }
            });

    DashboardSummary {
        total_lotes: lotes.len(),
        total_cabecas: total_cabecas(lotes),
        lucro_total: lucro_total(relatorio),
        a_receber,
        vendas_total,
    }
}

pub fn gastos_summary(gastos: &[GastoVet]) -> GastosSummary {
    gastos.iter().fold(GastosSummary::default(), |mut acc, g| {
        acc.total += g.valor;
        if g.pago {
            acc.pago += g.valor;
        } else {
            acc.pendente += g.valor;
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn lote(id: i64, quantidade: i32) -> Lote {
        Lote {
            id,
            numero_lote: format!("L-{}", id),
            quantidade,
            peso: dec("300"),
            valor_individual: dec("2000"),
            idade_media: dec("12"),
            data_compra: date(),
        }
    }

    fn venda(valor: &str, qtd: i32, recebido: bool) -> Venda {
        Venda {
            id: 1,
            lote_id: 1,
            numero_lote: "L-1".into(),
            comprador: "Frigorífico".into(),
            cpf_cnpj_comprador: "12345678000190".into(),
            valor_unitario: dec(valor),
            quantidade_vendida: qtd,
            prazo_pagamento: None,
            data_compra: date(),
            recebido,
            documento: None,
        }
    }

    #[test]
    fn summary_sums_heads_profit_and_receivables() {
        let lotes = vec![lote(1, 10), lote(2, 25)];
        let relatorio = vec![
            RelatorioLote {
                numero_lote: "L-1".into(),
                total_gastos: dec("100"),
                total_vendas: dec("600.50"),
                lucro: dec("500.50"),
            },
            RelatorioLote {
                numero_lote: "L-2".into(),
                total_gastos: dec("300"),
                total_vendas: dec("0"),
                lucro: dec("-300"),
            },
        ];
        let vendas = vec![venda("1000.00", 2, false), venda("500", 3, true)];

        let s = summarize(&lotes, &relatorio, &vendas);
        assert_eq!(s.total_lotes, 2);
        assert_eq!(s.total_cabecas, 35);
        assert_eq!(s.lucro_total, dec("200.50"));
        assert_eq!(s.a_receber, dec("2000"));
        assert_eq!(s.vendas_total, dec("3500"));
        assert_eq!(a_receber(&vendas), s.a_receber);
    }

    #[test]
    fn empty_lists_give_zeroes() {
        assert_eq!(summarize(&[], &[], &[]), DashboardSummary::default());
    }
}

// src/services/export_service.rs

//! Exportação da lista já carregada para planilha (CSV com `;`, que o
//! Excel em pt-BR abre direto).

use std::path::Path;

use serde::Serialize;

use crate::common::error::AppError;

pub fn to_spreadsheet<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

pub fn export_to_file<T: Serialize>(rows: &[T], path: &Path) -> Result<usize, AppError> {
    let bytes = to_spreadsheet(rows)?;
    std::fs::write(path, &bytes)?;
    tracing::info!("📄 Planilha gerada em {} ({} linhas)", path.display(), rows.len());
    Ok(rows.len())
}

//! Detail view model
//!
//! Flattens an `AnalysisResult` into the fixed sections the detail modal,
//! the text renderer and the PDF snapshot all draw.

use crate::types::{AnalysisResult, OrNotAvailable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DEFAULT_TITLE: &str = "DETALHES DO DOCUMENTO";
/// Rows before this index are header-like and never listed as products.
const FIRST_DATA_ROW: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: Option<String>,
}

impl DetailField {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }

    /// Value or "N/A".
    pub fn display(&self) -> String {
        self.value.clone().or_not_available()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ProductTable {
    /// Column count, taking ragged rows into account.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub main: Vec<DetailField>,
    pub transport: Vec<DetailField>,
    pub products: Option<ProductTable>,
    pub raw_text: String,
    pub raw_json: String,
}

impl DetailView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let main = vec![
            DetailField::new("Nome do Arquivo", result.file_name()),
            DetailField::new(
                "Processado em",
                result.processed_at().map(|value| format_date(&value)),
            ),
            DetailField::new("N° Documento", result.document_number()),
            DetailField::new("Data de Saída", result.departure_date()),
            DetailField::new("Responsável", result.dispatcher()),
            DetailField::new("Tamanho", result.file_size()),
            DetailField::new("Status", result.status()),
        ];

        let transport = vec![
            DetailField::new("Motorista", result.driver()),
            DetailField::new("Placa", result.plate()),
            DetailField::new("Valor do Frete", result.freight_value()),
        ];

        let products = result.first_table().and_then(|table| {
            let rows = table.rows();
            let header = rows.first()?.clone();
            Some(ProductTable {
                header,
                rows: rows.into_iter().skip(FIRST_DATA_ROW).collect(),
            })
        });

        let raw_json = serde_json::to_string_pretty(result.raw()).unwrap_or_default();

        Self {
            title: title_for(result.document_type().as_deref()),
            main,
            transport,
            products,
            raw_text: result.raw_text().unwrap_or_default(),
            raw_json,
        }
    }

    /// `raw_text` cut to at most `max_chars` characters.
    pub fn raw_text_excerpt(&self, max_chars: usize) -> String {
        self.raw_text.chars().take(max_chars).collect()
    }
}

/// "nota_de_remessa" -> "NOTA DE REMESSA".
pub fn title_for(document_type: Option<&str>) -> String {
    match document_type {
        Some(kind) if !kind.trim().is_empty() => kind.replace('_', " ").to_uppercase(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Formats a backend timestamp as a pt-BR date (`dd/mm/yyyy`).
///
/// Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok());

    match date {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

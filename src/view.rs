//! Plain-text rendering of the detail view, the list and the carousel
//! layout for the terminal.

use doc_scanner_common::carousel::{layout, paint_order};
use doc_scanner_common::listing::DocumentListItem;
use doc_scanner_common::upload::quick_summary;
use doc_scanner_common::{AnalysisResult, DetailField, DetailView, ProductTable, ViewMode};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn rule(out: &mut String, c: char) {
    let _ = writeln!(out, "{}", c.to_string().repeat(RULE_WIDTH));
}

fn section(out: &mut String, heading: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading);
    rule(out, '-');
}

fn fields(out: &mut String, fields: &[DetailField]) {
    let width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
    for field in fields {
        let pad = width - field.label.chars().count();
        let _ = writeln!(out, "{}:{} {}", field.label, " ".repeat(pad), field.display());
    }
}

fn table(out: &mut String, table: &ProductTable) {
    let columns = table.column_count();
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let line = |row: &[String]| {
        (0..columns)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{}{}", cell, " ".repeat(widths[i] - cell.chars().count()))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let _ = writeln!(out, "{}", line(&table.header).trim_end());
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row).trim_end());
    }
}

/// The detail modal as text. The JSON dump is optional since it repeats
/// everything above it.
pub fn render_detail(view: &DetailView, with_json: bool) -> String {
    let mut out = String::new();
    rule(&mut out, '=');
    let _ = writeln!(out, "{}", view.title);
    rule(&mut out, '=');

    section(&mut out, "Informações Principais");
    fields(&mut out, &view.main);

    section(&mut out, "Detalhes do Transporte");
    fields(&mut out, &view.transport);

    if let Some(products) = &view.products {
        section(&mut out, "Produtos Enviados");
        table(&mut out, products);
    }

    section(&mut out, "Conteúdo Bruto (OCR)");
    let _ = writeln!(out, "{}", view.raw_text);

    if with_json {
        section(&mut out, "JSON Completo");
        let _ = writeln!(out, "{}", view.raw_json);
    }
    out
}

/// "Resumo Rápido" shown after an upload.
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resumo Rápido");
    for (label, value) in quick_summary(result) {
        let _ = writeln!(out, "  {}: {}", label, value);
    }
    out
}

pub fn render_list(items: &[DocumentListItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{:>3}  {}  ({})", item.index + 1, item.name, item.date);
    }
    out
}

/// Layout of every item around `active_index`, in index order, followed by
/// the back-to-front paint order. Grid mode lists the cells instead.
pub fn render_carousel(active_index: usize, count: usize, mode: ViewMode) -> String {
    let mut out = String::new();
    if count == 0 {
        let _ = writeln!(out, "(vazio)");
        return out;
    }
    let active = active_index % count;

    match mode {
        ViewMode::Grid => {
            for index in 0..count {
                let marker = if index == active { '*' } else { ' ' };
                let _ = writeln!(out, "{} [{}]", marker, index);
            }
        }
        ViewMode::Carousel => {
            let _ = writeln!(
                out,
                "{:>5} {:>6} {:>8} {:>6} {:>7} {:>4} {:>7} {:>7}",
                "index", "offset", "position", "scale", "left", "z", "rotateY", "depth"
            );
            for (index, style) in layout(active, count).iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>5} {:>6} {:>8} {:>6.1} {:>7} {:>4} {:>7} {:>7}",
                    index,
                    style.offset,
                    style.position,
                    style.scale,
                    style.css_left(),
                    style.z_index,
                    format!("{}deg", style.rotate_y_deg),
                    format!("{}px", style.depth_px),
                );
            }
            let order = paint_order(active, count)
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            let _ = writeln!(out, "paint order: {}", order);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AnalysisResult {
        AnalysisResult::from_value(json!({
            "data": {
                "documento": {
                    "tipo_documento": "nota_de_remessa",
                    "metadata": { "nome_arquivo": "nota.png" },
                    "conteudo_completo": "NOTA 123"
                },
                "transporte": { "nome_do_caminhoneiro": { "valor": "Ana" } },
                "tabelas_detectadas": [{
                    "dados_estruturados": [["Produto", "Qtd"], ["", ""], ["Brita", "10"]]
                }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_render_detail_sections() {
        let text = render_detail(&DetailView::from_result(&sample()), false);
        assert!(text.contains("NOTA DE REMESSA"));
        assert!(text.contains("Nome do Arquivo: nota.png"));
        assert!(text.contains("Motorista:"));
        assert!(text.contains("Placa:"));
        assert!(text.contains("N/A"));
        assert!(text.contains("Brita   | 10"));
        assert!(text.contains("NOTA 123"));
        assert!(!text.contains("JSON Completo"));
    }

    #[test]
    fn test_render_detail_with_json() {
        let text = render_detail(&DetailView::from_result(&sample()), true);
        assert!(text.contains("JSON Completo"));
        assert!(text.contains("\"nome_arquivo\": \"nota.png\""));
    }

    #[test]
    fn test_render_summary() {
        let text = render_summary(&sample());
        assert!(text.contains("Arquivo: nota.png"));
        assert!(text.contains("Motorista: Ana"));
        assert!(text.contains("Data Saída: N/A"));
    }

    #[test]
    fn test_render_carousel() {
        let text = render_carousel(2, 5, ViewMode::Carousel);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        // active item: offset 0, position -2
        assert!(lines[3].contains("-2"));
        assert!(lines[3].contains("1.4"));
        assert!(lines[6].starts_with("paint order:"));
    }

    #[test]
    fn test_render_carousel_empty() {
        assert_eq!(render_carousel(0, 0, ViewMode::Carousel).trim(), "(vazio)");
    }

    #[test]
    fn test_render_grid_marks_active() {
        let text = render_carousel(6, 3, ViewMode::Grid);
        assert_eq!(text.lines().nth(0), Some("* [0]"));
    }
}

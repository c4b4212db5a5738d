//! PDF/JSON export integration tests

use doc_scanner::cli::ExportFormat;
use doc_scanner::error::Result;
use doc_scanner::export::{export_result, PdfExporter, Rasterizer};
use doc_scanner_common::export::pdf_core::RasterImage;
use doc_scanner_common::export::snapshot::{render_snapshot, Snapshot, SNAPSHOT_WIDTH_PX};
use doc_scanner_common::{AnalysisResult, DetailView};
use serde_json::{json, Value};
use tempfile::tempdir;

fn sample_response() -> Value {
    json!({
        "data": {
            "documento": {
                "tipo_documento": "nota_de_remessa",
                "metadata": {
                    "nome_arquivo": "remessa_0042.png",
                    "processado_em": "2025-03-14T09:26:53.589793",
                    "tamanho": 183245
                },
                "conteudo_completo": "NOTA DE REMESSA\nNº 0042\n".repeat(200),
                "status": "processado"
            },
            "dados_remessa": {
                "número_do_documento": { "valor": "0042" },
                "data_de_saída": { "valor": "14/03/2025" },
                "responsável_pela_expedição": { "valor": "Maria Souza" }
            },
            "transporte": {
                "nome_do_caminhoneiro": { "valor": "João Silva" },
                "placa_do_veículo": { "valor": "ABC-1D23" },
                "valor_do_frete": { "valor": 350.5 }
            },
            "tabelas_detectadas": [{
                "dados_estruturados": [
                    ["Produto", "Qtd", "Unidade"],
                    ["", "", ""],
                    ["Cimento CP-II", "40", "saco"]
                ]
            }]
        },
        "extra_backend_field": { "trace": [1, 2, 3] }
    })
}

/// White page of the snapshot's size at 2x, without touching system fonts.
struct BlankRasterizer;

impl Rasterizer for BlankRasterizer {
    fn rasterize(&self, snapshot: &Snapshot) -> Result<RasterImage> {
        let (w, h) = (snapshot.width * 2, snapshot.height * 2);
        Ok(RasterImage::new(w, h, vec![255; (w * h * 4) as usize])?)
    }
}

#[test]
fn test_json_export_round_trip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let raw = sample_response();
    let result = AnalysisResult::from_value(raw.clone()).unwrap();

    let written = export_result(
        &result,
        ExportFormat::Json,
        dir.path(),
        &PdfExporter::new(BlankRasterizer),
    )
    .expect("export failed");

    assert_eq!(written, vec![dir.path().join("remessa_0042.png.json")]);
    let text = std::fs::read_to_string(&written[0]).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, raw, "JSON export must be lossless");
    assert!(text.contains("\n  \"data\": {"));
}

#[test]
fn test_pdf_export() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = AnalysisResult::from_value(sample_response()).unwrap();

    let written = export_result(
        &result,
        ExportFormat::Pdf,
        dir.path(),
        &PdfExporter::new(BlankRasterizer),
    )
    .expect("export failed");

    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with("remessa_0042.png.pdf"));
    let bytes = std::fs::read(&written[0]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_long_document_spans_pages() {
    let result = AnalysisResult::from_value(sample_response()).unwrap();
    let snapshot = render_snapshot(&DetailView::from_result(&result));
    assert_eq!(snapshot.width, SNAPSHOT_WIDTH_PX);

    let pdf = PdfExporter::new(BlankRasterizer).render(&result).unwrap();
    // 1600 px wide at 2x -> 2332 rows per A4 band
    let expected = ((snapshot.height * 2) as f32 / 2332.0).ceil().max(1.0) as usize;
    assert_eq!(pdf.page_count, expected);
    assert!(pdf.page_count >= 1);
}

#[test]
fn test_export_both_to_file_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("saida").join("nota.pdf");
    let result = AnalysisResult::from_value(json!({ "data": {} })).unwrap();

    let written = export_result(
        &result,
        ExportFormat::Both,
        &output,
        &PdfExporter::new(BlankRasterizer),
    )
    .expect("export failed");

    assert_eq!(
        written,
        vec![dir.path().join("saida").join("nota.pdf"), dir.path().join("saida").join("nota.json")]
    );
    assert!(written.iter().all(|p| p.exists()));
}

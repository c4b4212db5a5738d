pub mod json;
pub mod pdf;
pub mod raster;

use crate::cli::ExportFormat;
use crate::error::Result;
use doc_scanner_common::export::export_file_name;
use doc_scanner_common::AnalysisResult;
use std::path::{Path, PathBuf};

pub use pdf::{PdfExporter, RenderedPdf};
pub use raster::{Rasterizer, ResvgRasterizer};

/// Output path for one format: a directory gets the default file name, a
/// file path is used as-is (with its extension replaced).
fn output_path_for_format(output: &Path, result: &AnalysisResult, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(result, extension))
    } else {
        output.with_extension(extension)
    }
}

/// Writes the requested files and returns their paths.
pub fn export_result<R: Rasterizer>(
    result: &AnalysisResult,
    format: ExportFormat,
    output: &Path,
    pdf_exporter: &PdfExporter<R>,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    } else if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Pdf | ExportFormat::Both) {
        let path = output_path_for_format(output, result, "pdf");
        println!("- Gerando PDF...");
        let pages = pdf_exporter.export(result, &path)?;
        println!("✔ PDF salvo: {} ({} página(s))", path.display(), pages);
        written.push(path);
    }

    if matches!(format, ExportFormat::Json | ExportFormat::Both) {
        let path = output_path_for_format(output, result, "json");
        println!("- Gerando JSON...");
        json::export_json(result, &path)?;
        println!("✔ JSON salvo: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(name: &str) -> AnalysisResult {
        AnalysisResult::from_value(json!({
            "data": { "documento": { "metadata": { "nome_arquivo": name } } }
        }))
        .unwrap()
    }

    #[test]
    fn test_output_path_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path_for_format(dir.path(), &named("nota.png"), "json");
        assert_eq!(path, dir.path().join("nota.png.json"));
    }

    #[test]
    fn test_output_path_with_file_name() {
        let path = output_path_for_format(Path::new("out/result.pdf"), &named("nota.png"), "json");
        assert_eq!(path, PathBuf::from("out/result.json"));
    }
}

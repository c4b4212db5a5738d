use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use doc_scanner::export::{PdfExporter, ResvgRasterizer};
use doc_scanner_common::AnalysisResult;
use doc_scanner_common::export::json_core::to_pretty_json;

/// Opens a previously saved analysis response.
pub fn load_result(path: &Path) -> Result<AnalysisResult> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    AnalysisResult::from_json_str(&content).with_context(|| format!("parse {}", path.display()))
}

pub fn save_json(path: &Path, result: &AnalysisResult) -> Result<()> {
    let content = to_pretty_json(result)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Returns the page count.
pub fn save_pdf(path: &Path, result: &AnalysisResult) -> Result<usize> {
    let exporter = PdfExporter::new(ResvgRasterizer::new());
    exporter
        .export(result, path)
        .with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_json_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nota.json");
        let raw = serde_json::json!({
            "data": { "documento": { "metadata": { "nome_arquivo": "nota.png" } } },
            "extra": [1, 2]
        });
        let result = AnalysisResult::from_value(raw.clone()).unwrap();

        save_json(&path, &result).unwrap();
        let loaded = load_result(&path).unwrap();
        assert_eq!(loaded.raw(), &raw);
        assert_eq!(loaded.file_name().as_deref(), Some("nota.png"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_result(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().starts_with("read "));
    }
}

//! Export core modules shared by the CLI and the desktop viewer.

pub mod json_core;
pub mod pdf_core;
pub mod snapshot;

use crate::types::AnalysisResult;

const FALLBACK_FILE_STEM: &str = "documento";

/// `<nome_arquivo or "documento">.<extension>`, safe to use as a file name.
pub fn export_file_name(result: &AnalysisResult, extension: &str) -> String {
    let stem = result
        .file_name()
        .map(|name| {
            name.chars()
                .map(|c| match c {
                    '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                    c if c.is_control() => '_',
                    c => c,
                })
                .collect::<String>()
        })
        .filter(|name| !name.trim_matches(|c| c == '.' || c == ' ').is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_STEM.to_string());
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_file_name_uses_source_name() {
        let result = AnalysisResult::from_value(json!({
            "data": { "documento": { "metadata": { "nome_arquivo": "scan.png" } } }
        }))
        .expect("parse failed");
        assert_eq!(export_file_name(&result, "pdf"), "scan.png.pdf");
        assert_eq!(export_file_name(&result, "json"), "scan.png.json");
    }

    #[test]
    fn test_export_file_name_fallback() {
        let result = AnalysisResult::from_value(json!({ "data": {} })).expect("parse failed");
        assert_eq!(export_file_name(&result, "json"), "documento.json");
    }

    #[test]
    fn test_export_file_name_strips_separators() {
        let result = AnalysisResult::from_value(json!({
            "data": { "documento": { "metadata": { "nome_arquivo": "../etc/passwd" } } }
        }))
        .expect("parse failed");
        assert_eq!(export_file_name(&result, "pdf"), ".._etc_passwd.pdf");
    }
}

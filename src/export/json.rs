use crate::error::Result;
use doc_scanner_common::export::json_core::to_pretty_json_bytes;
use doc_scanner_common::AnalysisResult;
use std::path::Path;

/// Saves the response exactly as received, pretty printed.
pub fn export_json(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, to_pretty_json_bytes(result)?)?;
    Ok(())
}

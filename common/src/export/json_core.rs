//! JSON export: the response exactly as received, pretty printed.

use crate::error::Result;
use crate::types::AnalysisResult;

/// Two-space indented JSON of the raw response.
pub fn to_pretty_json(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result.raw())?)
}

pub fn to_pretty_json_bytes(result: &AnalysisResult) -> Result<Vec<u8>> {
    Ok(to_pretty_json(result)?.into_bytes())
}

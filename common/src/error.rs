//! Error types shared by every crate in the workspace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not shaped like an analysis result at all.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Pixel buffer does not match its declared size.
    #[error("Raster error: {0}")]
    Raster(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_schema() {
        let error = Error::Schema("expected an object".to_string());
        assert_eq!(format!("{}", error), "Schema error: expected an object");
    }

    #[test]
    fn test_error_display_raster() {
        let error = Error::Raster("empty image".to_string());
        assert_eq!(format!("{}", error), "Raster error: empty image");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}

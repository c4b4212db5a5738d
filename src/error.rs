use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocScannerError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao interpretar JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de conexão: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Envio recusado ({status}): {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Falha ao buscar documentos: {0}")]
    ListFetch(String),

    #[error("Operação cancelada")]
    Cancelled,

    #[error("Falha após {attempts} tentativas: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Erro ao gerar PDF: {0}")]
    Pdf(String),

    #[error("Erro ao renderizar snapshot: {0}")]
    Raster(String),

    #[error("Tipo de arquivo não suportado: {0}")]
    UnsupportedFile(String),

    #[error(transparent)]
    Common(#[from] doc_scanner_common::Error),
}

impl DocScannerError {
    /// Status line for the upload form, matching what the form shows for
    /// the same failure in the desktop viewer.
    pub fn upload_status(&self) -> String {
        use doc_scanner_common::upload::{connection_message, rejection_message};

        match self {
            DocScannerError::UploadRejected { status, body } => rejection_message(*status, body),
            DocScannerError::Http(err) => connection_message(&err.to_string()),
            other => connection_message(&other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocScannerError>;

//! Upload form state
//!
//! Holds the selected file, the status line and the last successful
//! response. The HTTP call itself is made by the caller between
//! `begin_submit` and one of the `finish_*` methods.

use crate::types::AnalysisResult;

/// Multipart field name expected by the analysis endpoint.
pub const UPLOAD_FIELD: &str = "document";

const IDLE_STATUS: &str = "Nenhum arquivo selecionado.";
const INVALID_TYPE_STATUS: &str = "Por favor, selecione um arquivo de imagem ou PDF.";
const NO_FILE_STATUS: &str = "Nenhum arquivo selecionado para envio.";
const SENDING_STATUS: &str = "Enviando arquivo e aguardando análise...";
const SUCCESS_STATUS: &str = "Sucesso! Documento processado.";

const JSON_ERROR_PREVIEW_CHARS: usize = 100;
const TEXT_ERROR_PREVIEW_CHARS: usize = 50;

/// `image/*` or `application/pdf`.
pub fn is_supported_mime(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    mime.starts_with("image/") || mime == "application/pdf"
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    selected: Option<SelectedFile>,
    status: Option<String>,
    response: Option<AnalysisResult>,
    in_flight: bool,
}

impl UploadForm {
    /// Validates and stores the chosen file. Returns whether it was accepted.
    pub fn select_file(&mut self, name: &str, mime: &str) -> bool {
        if is_supported_mime(mime) {
            self.selected = Some(SelectedFile {
                name: name.to_string(),
                mime: mime.to_string(),
            });
            self.status = Some(format!("Arquivo selecionado: {}", name));
            true
        } else {
            self.selected = None;
            self.status = Some(INVALID_TYPE_STATUS.to_string());
            false
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.in_flight
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight
    }

    /// Status line shown under the form.
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(IDLE_STATUS)
    }

    /// Label of the file picker button.
    pub fn select_label(&self) -> &'static str {
        if self.selected.is_some() {
            "Trocar Arquivo"
        } else {
            "Selecionar Documento"
        }
    }

    pub fn response(&self) -> Option<&AnalysisResult> {
        self.response.as_ref()
    }

    /// Starts a submission, returning the file to send.
    pub fn begin_submit(&mut self) -> Option<SelectedFile> {
        if self.in_flight {
            return None;
        }
        match self.selected.clone() {
            Some(file) => {
                self.in_flight = true;
                self.status = Some(SENDING_STATUS.to_string());
                Some(file)
            }
            None => {
                self.status = Some(NO_FILE_STATUS.to_string());
                None
            }
        }
    }

    pub fn finish_success(&mut self, result: AnalysisResult) {
        self.in_flight = false;
        self.response = Some(result);
        self.selected = None;
        self.status = Some(SUCCESS_STATUS.to_string());
    }

    /// Non-2xx response from the endpoint.
    pub fn finish_rejected(&mut self, status: u16, body: &str) {
        self.in_flight = false;
        self.status = Some(rejection_message(status, body));
    }

    /// Transport failure.
    pub fn finish_connection_error(&mut self, message: &str) {
        self.in_flight = false;
        self.status = Some(connection_message(message));
    }
}

/// Status text for a non-2xx upload response.
pub fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => {
            let detail = match json.get("detail") {
                Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
                Some(detail @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
                    detail.to_string()
                }
                _ => preview(&json.to_string(), JSON_ERROR_PREVIEW_CHARS),
            };
            format!("Erro: {}...", detail)
        }
        Err(_) => format!(
            "Erro ao enviar: {} - {}...",
            status,
            preview(body, TEXT_ERROR_PREVIEW_CHARS)
        ),
    }
}

pub fn connection_message(message: &str) -> String {
    format!("Erro de conexão: {}", message)
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// "Resumo Rápido" lines shown after a successful upload.
pub fn quick_summary(result: &AnalysisResult) -> Vec<(&'static str, String)> {
    use crate::types::OrNotAvailable;

    vec![
        ("Arquivo", result.file_name().or_not_available()),
        ("Tipo", result.document_type().or_not_available()),
        ("Número Documento", result.document_number().or_not_available()),
        ("Data Saída", result.departure_date().or_not_available()),
        ("Motorista", result.driver().or_not_available()),
    ]
}

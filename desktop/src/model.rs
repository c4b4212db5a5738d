use std::path::PathBuf;

use doc_scanner_common::{Dashboard, ModalState, UploadForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upload,
    Documents,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Upload => "Enviar Documento",
            Tab::Documents => "Documentos",
        }
    }
}

/// Which detail window a modal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSource {
    Upload,
    Dashboard,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub tab: Tab,
    pub form: UploadForm,
    /// Path behind the form's current selection.
    pub selected_path: Option<PathBuf>,
    pub upload_modal: ModalState,
    pub dashboard: Dashboard,
}

impl AppState {
    /// Validates and stores a picked file. Rejected files clear the path too.
    pub fn select_file(&mut self, path: PathBuf) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime = mime_guess::from_path(&path).first_or_octet_stream().to_string();
        if self.form.select_file(&name, &mime) {
            self.selected_path = Some(path);
            true
        } else {
            self.selected_path = None;
            false
        }
    }

    pub fn modal(&self, source: ModalSource) -> &ModalState {
        match source {
            ModalSource::Upload => &self.upload_modal,
            ModalSource::Dashboard => self.dashboard.modal(),
        }
    }

    pub fn close_modal(&mut self, source: ModalSource) {
        match source {
            ModalSource::Upload => self.upload_modal.close(),
            ModalSource::Dashboard => self.dashboard.close_modal(),
        }
    }
}

//! Detail modal state

use crate::types::AnalysisResult;

/// Open/closed state of the detail modal.
///
/// The open state always carries its document, so an open modal without
/// data cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    data: Option<AnalysisResult>,
}

impl ModalState {
    pub fn open(&mut self, data: AnalysisResult) {
        self.data = Some(data);
    }

    /// Opens only when there is something to show.
    pub fn open_with(&mut self, data: Option<&AnalysisResult>) -> bool {
        match data {
            Some(data) => {
                self.open(data.clone());
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.data = None;
    }

    pub fn is_open(&self) -> bool {
        self.data.is_some()
    }

    /// Document to render, `None` while closed.
    pub fn data(&self) -> Option<&AnalysisResult> {
        self.data.as_ref()
    }
}

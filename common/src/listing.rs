//! Document list and dashboard state

use crate::detail::format_date;
use crate::error::{Error, Result};
use crate::modal::ModalState;
use crate::navigation::{SwipeDirection, ViewState};
use crate::types::{AnalysisResult, NOT_AVAILABLE};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "assets/document-placeholder.png";

/// Body of the list endpoint: `{ "success": true, "files": [...] }`.
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    success: bool,
    files: Option<Vec<Value>>,
}

/// Parses the list endpoint body.
///
/// Anything other than `success: true` with a `files` array is an error; the
/// caller treats that like any other failed attempt.
pub fn parse_list_response(body: &str) -> Result<Vec<AnalysisResult>> {
    let response: ListResponse = serde_json::from_str(body)?;
    if !response.success {
        return Err(Error::Schema("`success` is not true".to_string()));
    }
    let files = response
        .files
        .ok_or_else(|| Error::Schema("`files` array is missing".to_string()))?;
    files.into_iter().map(AnalysisResult::from_value).collect()
}

/// One dashboard card.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentListItem {
    pub index: usize,
    pub result: AnalysisResult,
    pub image: String,
    pub name: String,
    pub date: String,
}

impl DocumentListItem {
    pub fn new(index: usize, result: AnalysisResult, placeholder_image: &str) -> Self {
        let name = result
            .file_name()
            .unwrap_or_else(|| format!("Documento {}", index + 1));
        let date = result
            .processed_at()
            .map(|value| format_date(&value))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            index,
            result,
            image: placeholder_image.to_string(),
            name,
            date,
        }
    }
}

pub fn build_items(results: Vec<AnalysisResult>, placeholder_image: &str) -> Vec<DocumentListItem> {
    results
        .into_iter()
        .enumerate()
        .map(|(index, result)| DocumentListItem::new(index, result, placeholder_image))
        .collect()
}

/// Loading state of the dashboard list.
///
/// `Empty` covers both an empty list and a fetch that ran out of attempts;
/// the user sees the same message either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Loading,
    Loaded(Vec<DocumentListItem>),
    Empty,
}

impl FetchState {
    pub fn from_outcome<E>(outcome: std::result::Result<Vec<DocumentListItem>, E>) -> Self {
        match outcome {
            Ok(items) if !items.is_empty() => FetchState::Loaded(items),
            _ => FetchState::Empty,
        }
    }

    pub fn items(&self) -> &[DocumentListItem] {
        match self {
            FetchState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            FetchState::Loading => Some("Carregando documentos..."),
            FetchState::Empty => Some(EMPTY_MESSAGE),
            FetchState::Loaded(_) => None,
        }
    }
}

pub const EMPTY_MESSAGE: &str = "Nenhum documento encontrado.";

/// Dashboard component state: list, navigation and the detail modal.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    fetch: FetchState,
    view: ViewState,
    modal: ModalState,
}

impl Dashboard {
    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn items(&self) -> &[DocumentListItem] {
        self.fetch.items()
    }

    pub fn count(&self) -> usize {
        self.items().len()
    }

    pub fn start_loading(&mut self) {
        self.fetch = FetchState::Loading;
    }

    /// Replaces the list with a fresh fetch result.
    pub fn finish_loading(&mut self, state: FetchState) {
        self.fetch = state;
        let count = self.count();
        self.view.normalize(count);
    }

    pub fn next(&mut self) {
        let count = self.count();
        self.view.next(count);
    }

    pub fn previous(&mut self) {
        let count = self.count();
        self.view.previous(count);
    }

    pub fn swipe(&mut self, direction: SwipeDirection) {
        let count = self.count();
        self.view.apply(direction, count);
    }

    pub fn toggle_view_mode(&mut self) {
        self.view.toggle_view_mode();
    }

    /// Focuses `index` and opens the modal with that item's data.
    pub fn select_index(&mut self, index: usize) {
        let count = self.count();
        if count == 0 {
            return;
        }
        self.view.select(index, count);
        let result = self.items().get(self.view.active_index()).map(|item| item.result.clone());
        if let Some(result) = result {
            self.modal.open(result);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    pub fn active_item(&self) -> Option<&DocumentListItem> {
        self.items().get(self.view.active_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ViewMode;
    use crate::types::fixtures::sample_response;
    use serde_json::json;

    fn list_body(count: usize) -> String {
        let files: Vec<Value> = (0..count).map(|_| sample_response()).collect();
        json!({ "success": true, "files": files }).to_string()
    }

    fn loaded_dashboard(count: usize) -> Dashboard {
        let results = parse_list_response(&list_body(count)).expect("parse failed");
        let mut dashboard = Dashboard::default();
        dashboard.finish_loading(FetchState::from_outcome::<Error>(Ok(build_items(
            results,
            DEFAULT_PLACEHOLDER_IMAGE,
        ))));
        dashboard
    }

    #[test]
    fn test_parse_list_response() {
        let results = parse_list_response(&list_body(3)).expect("parse failed");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].driver().as_deref(), Some("João Silva"));
    }

    #[test]
    fn test_parse_list_rejects_bad_shapes() {
        assert!(parse_list_response("not json").is_err());
        assert!(parse_list_response(r#"{"success": false, "files": []}"#).is_err());
        assert!(parse_list_response(r#"{"success": true}"#).is_err());
        assert!(parse_list_response(r#"{"files": []}"#).is_err());
        assert!(parse_list_response(r#"{"success": true, "files": [42]}"#).is_err());
    }

    #[test]
    fn test_parse_list_tolerates_partial_entries() {
        let body = json!({
            "success": true,
            "files": [
                sample_response(),
                { "data": { "transporte": null, "tabelas_detectadas": null,
                            "documento": { "metadata": { "nome_arquivo": "parcial.jpg", "processado_em": null } } } }
            ]
        })
        .to_string();
        let results = parse_list_response(&body).expect("parse failed");
        assert_eq!(results.len(), 2);
        let items = build_items(results, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(items[1].name, "parcial.jpg");
        assert_eq!(items[1].date, "N/A");
        assert_eq!(items[1].result.driver(), None);
    }

    #[test]
    fn test_list_item_view_model() {
        let result = AnalysisResult::from_value(sample_response()).expect("parse failed");
        let item = DocumentListItem::new(4, result, "placeholder.png");
        assert_eq!(item.index, 4);
        assert_eq!(item.name, "remessa_0042.png");
        assert_eq!(item.date, "14/03/2025");
        assert_eq!(item.image, "placeholder.png");
    }

    #[test]
    fn test_list_item_fallbacks() {
        let result = AnalysisResult::from_value(json!({})).expect("parse failed");
        let item = DocumentListItem::new(0, result, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(item.name, "Documento 1");
        assert_eq!(item.date, "N/A");
    }

    #[test]
    fn test_fetch_state_from_outcome() {
        assert_eq!(FetchState::from_outcome::<Error>(Ok(vec![])), FetchState::Empty);
        let failed: std::result::Result<Vec<DocumentListItem>, &str> = Err("boom");
        assert_eq!(FetchState::from_outcome(failed), FetchState::Empty);
        assert_eq!(FetchState::Empty.message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn test_select_index_opens_modal() {
        let mut dashboard = loaded_dashboard(3);
        dashboard.select_index(1);
        assert_eq!(dashboard.view().active_index(), 1);
        assert!(dashboard.modal().is_open());
        assert_eq!(
            dashboard.modal().data(),
            Some(&dashboard.items()[1].result)
        );
        dashboard.close_modal();
        assert!(!dashboard.modal().is_open());
    }

    #[test]
    fn test_select_on_empty_dashboard() {
        let mut dashboard = Dashboard::default();
        dashboard.finish_loading(FetchState::Empty);
        dashboard.select_index(0);
        assert!(!dashboard.modal().is_open());
        dashboard.next();
        assert_eq!(dashboard.view().active_index(), 0);
    }

    #[test]
    fn test_refetch_renormalizes_index() {
        let mut dashboard = loaded_dashboard(5);
        dashboard.previous();
        assert_eq!(dashboard.view().active_index(), 4);
        let results = parse_list_response(&list_body(2)).expect("parse failed");
        dashboard.finish_loading(FetchState::Loaded(build_items(results, "p.png")));
        assert_eq!(dashboard.view().active_index(), 0);
    }

    #[test]
    fn test_swipe_and_toggle() {
        let mut dashboard = loaded_dashboard(3);
        dashboard.swipe(SwipeDirection::Next);
        assert_eq!(dashboard.view().active_index(), 1);
        dashboard.toggle_view_mode();
        assert_eq!(dashboard.view().view_mode(), ViewMode::Grid);
        assert_eq!(dashboard.active_item().map(|i| i.index), Some(1));
    }
}

//! Doc-Scanner Common Library
//!
//! Shared by the CLI and the desktop viewer. Everything here is free of I/O:
//! the schema of an analysis result, the dashboard/carousel state, the
//! upload form state and the export building blocks.

pub mod carousel;
pub mod detail;
pub mod error;
pub mod export;
pub mod listing;
pub mod modal;
pub mod navigation;
pub mod retry;
pub mod types;
pub mod upload;

pub use carousel::{item_style, ItemStyle};
pub use detail::{DetailField, DetailView, ProductTable};
pub use error::{Error, Result};
pub use listing::{Dashboard, DocumentListItem, FetchState};
pub use modal::ModalState;
pub use navigation::{SwipeDirection, SwipeTracker, ViewMode, ViewState};
pub use retry::RetryPolicy;
pub use types::{AnalysisResult, OrNotAvailable, NOT_AVAILABLE};
pub use upload::UploadForm;

//! Doc-Scanner client: upload to the analysis backend, document list with
//! retry, PDF/JSON export and the terminal front end.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod retry;
pub mod view;

//! Client for the analysis backend: document upload and the list endpoint.

use crate::config::Config;
use crate::error::{DocScannerError, Result};
use crate::retry::retry_with_backoff;
use doc_scanner_common::listing::{build_items, parse_list_response, FetchState};
use doc_scanner_common::upload::{is_supported_mime, UPLOAD_FIELD};
use doc_scanner_common::{AnalysisResult, RetryPolicy};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    upload_endpoint: String,
    list_endpoint: String,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(upload_endpoint: impl Into<String>, list_endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_endpoint: upload_endpoint.into(),
            list_endpoint: list_endpoint.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            upload_endpoint: config.upload_endpoint(),
            list_endpoint: config.list_endpoint(),
            retry: config.retry_policy(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn upload_endpoint(&self) -> &str {
        &self.upload_endpoint
    }

    pub fn list_endpoint(&self) -> &str {
        &self.list_endpoint
    }

    /// Reads `path`, checks its type and uploads it.
    pub async fn upload_file(&self, path: &Path) -> Result<AnalysisResult> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                DocScannerError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("caminho sem nome de arquivo: {}", path.display()),
                ))
            })?;
        let mime = mime_guess::from_path(path).first_or_octet_stream().to_string();
        if !is_supported_mime(&mime) {
            return Err(DocScannerError::UnsupportedFile(format!("{} ({})", name, mime)));
        }
        let bytes = tokio::fs::read(path).await?;
        self.upload(&name, &mime, bytes).await
    }

    /// Posts one document as multipart form data.
    ///
    /// Non-2xx responses come back as `UploadRejected` with the body text so
    /// the caller can build the status line from it.
    pub async fn upload(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<AnalysisResult> {
        info!("uploading {} ({}, {} bytes) to {}", name, mime, bytes.len(), self.upload_endpoint);
        let part = Part::bytes(bytes).file_name(name.to_string()).mime_str(mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(&self.upload_endpoint)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("upload response: {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(DocScannerError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(AnalysisResult::from_json_str(&body)?)
    }

    /// One GET of the list endpoint; any failure is reported as `ListFetch`.
    pub async fn fetch_documents_once(&self) -> Result<Vec<AnalysisResult>> {
        let response = self
            .http
            .get(&self.list_endpoint)
            .send()
            .await
            .map_err(|e| DocScannerError::ListFetch(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocScannerError::ListFetch(format!("status {}", status.as_u16())));
        }
        let body = response
            .text()
            .await
            .map_err(|e| DocScannerError::ListFetch(e.to_string()))?;
        parse_list_response(&body).map_err(|e| DocScannerError::ListFetch(e.to_string()))
    }

    /// Fetches the document list under the client's retry policy.
    pub async fn fetch_documents(&self, cancel: &CancellationToken) -> Result<Vec<AnalysisResult>> {
        let documents =
            retry_with_backoff(self.retry, cancel, |_| self.fetch_documents_once()).await?;
        info!("fetched {} documents", documents.len());
        Ok(documents)
    }

    /// Fetch for the dashboard: exhausted retries and an empty list both end
    /// in `FetchState::Empty`. Only cancellation is passed through.
    pub async fn load_dashboard(
        &self,
        cancel: &CancellationToken,
        placeholder_image: &str,
    ) -> Result<FetchState> {
        match self.fetch_documents(cancel).await {
            Err(DocScannerError::Cancelled) => Err(DocScannerError::Cancelled),
            outcome => Ok(FetchState::from_outcome(
                outcome.map(|documents| build_items(documents, placeholder_image)),
            )),
        }
    }
}

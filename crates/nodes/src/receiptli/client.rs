//! HTTP client for the document-extraction service.

use std::time::Duration;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::credentials::ReceiptliCredentials;

/// Path of the extraction endpoint, relative to the configured base URL.
pub const EXTRACT_PATH: &str = "/api/v1/extract-text";

/// Upper bound on a single extraction call before it is abandoned.
pub const EXTRACTION_TIMEOUT: Duration = Duration::from_millis(3_600_000);

pub const FALLBACK_FILE_NAME: &str = "document.pdf";
pub const FALLBACK_MIME_TYPE: &str = "application/pdf";

/// Why an extraction call failed.
///
/// The node folds all of these into `NodeError::RequestFailure`; the
/// variants only shape the message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

/// One file to extract.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub file: Bytes,
    pub file_name: String,
    pub mime_type: String,
    /// Caller-supplied JSON description of the desired output, sent as-is.
    pub schema: String,
    pub language: String,
}

/// Thin wrapper around `reqwest::Client` bound to one set of credentials.
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    client: reqwest::Client,
    credentials: ReceiptliCredentials,
    timeout: Duration,
}

impl ExtractionClient {
    pub fn new(credentials: ReceiptliCredentials) -> Self {
        Self::with_http_client(reqwest::Client::new(), credentials)
    }

    /// Reuse an existing connection pool.
    pub fn with_http_client(client: reqwest::Client, credentials: ReceiptliCredentials) -> Self {
        Self {
            client,
            credentials,
            timeout: EXTRACTION_TIMEOUT,
        }
    }

    /// Override the per-request timeout (defaults to [`EXTRACTION_TIMEOUT`]).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the extraction endpoint.
    pub fn endpoint(&self) -> String {
        let base = self.credentials.base_url.as_str();
        let base = base.trim_end_matches('/');
        format!("{base}{EXTRACT_PATH}")
    }

    /// POST one file and return the service's JSON response untouched.
    pub async fn extract(&self, request: ExtractionRequest) -> Result<Value, ClientError> {
        let endpoint = self.endpoint();
        debug!(
            endpoint = %endpoint,
            file_name = %request.file_name,
            bytes = request.file.len(),
            "sending extraction request"
        );

        let part = file_part(&request.file, &request.file_name, &request.mime_type);

        let form = Form::new()
            .part("file", part)
            .text("schema", request.schema)
            .text("language", request.language);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.credentials.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Build the `file` part. A stored MIME type that does not parse is
/// replaced by [`FALLBACK_MIME_TYPE`] rather than failing the item.
fn file_part(file: &Bytes, file_name: &str, mime_type: &str) -> Part {
    let build = || Part::bytes(file.to_vec()).file_name(file_name.to_owned());
    match build().mime_str(mime_type) {
        Ok(part) => part,
        Err(_) => {
            warn!(
                mime_type = %mime_type,
                fallback = FALLBACK_MIME_TYPE,
                "unparsable MIME type on attachment, using fallback"
            );
            build()
                .mime_str(FALLBACK_MIME_TYPE)
                .unwrap_or_else(|_| build())
        }
    }
}

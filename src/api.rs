// API client module: a small blocking HTTP client for Slotify's
// token-protected export and import endpoints. One request per call,
// no retries; failures come back as `SlotifyError`.

use crate::error::{Result, SlotifyError};
use crate::token::ApiToken;
use reqwest::blocking::{multipart, Client, Response};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::fs::File;

pub const EXPORT_PATH: &str = "/api/export";
pub const IMPORT_PATH: &str = "/api/import";

/// Multipart field the import endpoint reads the archive from.
const IMPORT_FIELD: &str = "file";
const ZIP_MIME: &str = "application/zip";

/// Holds a reqwest blocking client, the base URL of the Slotify
/// deployment and the prepared `Authorization` header.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
}

/// Body of a successful import. The server sends `{"message": "..."}`;
/// anything else is accepted and leaves `message` empty.
#[derive(Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ImportResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &ApiToken) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| SlotifyError::InvalidToken)?;
        authorization.set_sensitive(true);

        let client = Client::builder()
            .user_agent(concat!("slotify-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SlotifyError::HttpClient)?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }

    /// GET /api/export and return the archive bytes.
    pub fn export(&self) -> Result<Vec<u8>> {
        let url = self.endpoint(EXPORT_PATH);
        tracing::debug!(%url, "requesting export");

        let res = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .map_err(|source| network(&url, source))?;
        // Only a 200 carries a complete archive; 204/206 would save a stub.
        let res = ensure_status("Export", res, |status| status == StatusCode::OK)?;

        let body = res.bytes().map_err(|source| network(&url, source))?;
        tracing::debug!(bytes = body.len(), "export body received");
        Ok(body.to_vec())
    }

    /// POST an already opened archive to /api/import as multipart form
    /// data under `file_name`. The file is streamed rather than buffered.
    pub fn import(&self, archive: File, file_name: &str) -> Result<ImportResponse> {
        let url = self.endpoint(IMPORT_PATH);
        tracing::debug!(%url, file_name, "uploading archive");

        let len = archive
            .metadata()
            .map_err(|e| SlotifyError::io(format!("Failed to stat {file_name}"), e))?
            .len();

        let part = multipart::Part::reader_with_length(archive, len)
            .file_name(file_name.to_string())
            .mime_str(ZIP_MIME)
            .map_err(SlotifyError::HttpClient)?;
        let form = multipart::Form::new().part(IMPORT_FIELD, part);

        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers())
            .multipart(form)
            .send()
            .map_err(|source| network(&url, source))?;
        let res = ensure_status("Import", res, |status| status.is_success())?;

        let text = res.text().map_err(|source| network(&url, source))?;
        Ok(serde_json::from_str(&text).unwrap_or_default())
    }
}

fn network(url: &str, source: reqwest::Error) -> SlotifyError {
    SlotifyError::Network {
        url: url.to_string(),
        source,
    }
}

/// Turn a response whose status `accept` rejects into an `Api` error
/// carrying the body as sent.
fn ensure_status(
    operation: &'static str,
    res: Response,
    accept: fn(StatusCode) -> bool,
) -> Result<Response> {
    let status = res.status();
    tracing::debug!(%status, operation, "response received");
    if accept(status) {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    Err(SlotifyError::Api {
        operation,
        status,
        body,
    })
}

//! `reqwest` implementation of [`NotesApi`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use jotter_core::{
    defaults, AuthToken, CreateNoteRequest, Error, LoginRequest, Note, NotesApi, RegisterRequest,
    Result,
};

use crate::config::ClientConfig;
use crate::error::{to_jotter_error, Endpoint};
use crate::normalize;
use crate::types::{ErrorBody, TokenResponse};

/// Status and body of a completed HTTP exchange.
struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx response into the categorized error for `endpoint`.
    fn error_for_status(self, endpoint: Endpoint) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(ErrorBody::into_message);
        Err(to_jotter_error(endpoint, self.status, message))
    }

    fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| Error::DataShape(format!("response is not valid JSON: {}", e)))
    }
}

/// HTTP client for the notes API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            timeout_secs = ?config.timeout_secs,
            "Initializing notes API client"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request with the correlation id and bearer token attached.
    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        token: Option<&str>,
        request_id: &str,
    ) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, self.config.url(endpoint))
            .header(defaults::REQUEST_ID_HEADER, request_id);

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Send a request. Only transport failures are errors here.
    async fn send(&self, op: &'static str, request_id: &str, req: RequestBuilder) -> Result<RawResponse> {
        let start = Instant::now();
        let response = req.send().await.map_err(|e| {
            warn!(op, request_id, error = %e, "request failed");
            Error::Network(format!("Request failed: {}", e))
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!(op, request_id, status, error = %e, "failed to read response body");
            Error::Network(format!("Failed to read response: {}", e))
        })?;

        debug!(
            op,
            request_id,
            status,
            duration_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        Ok(RawResponse { status, body })
    }

    async fn authenticate<B: serde::Serialize + ?Sized>(
        &self,
        op: &'static str,
        endpoint: &str,
        body: &B,
    ) -> Result<AuthToken> {
        let request_id = new_request_id();
        let req = self
            .build_request(Method::POST, endpoint, None, &request_id)
            .json(body);

        let raw = self
            .send(op, &request_id, req)
            .await?
            .error_for_status(Endpoint::Auth)?;

        let parsed: TokenResponse = serde_json::from_str(&raw.body)
            .map_err(|e| Error::DataShape(format!("response is not valid JSON: {}", e)))?;
        normalize::token_from_body(parsed.token)
    }
}

fn new_request_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

#[async_trait]
impl NotesApi for ApiClient {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthToken> {
        self.authenticate("register", "/auth/register", req).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthToken> {
        self.authenticate("login", "/auth/login", req).await
    }

    async fn list_notes(&self, token: Option<&str>, tag: Option<&str>) -> Result<Vec<Note>> {
        let request_id = new_request_id();
        let mut req = self.build_request(Method::GET, "/notes", token, &request_id);
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            req = req.query(&[("tag", tag)]);
        }

        let raw = self
            .send("list_notes", &request_id, req)
            .await?
            .error_for_status(Endpoint::Notes)?;
        let notes = normalize::notes_from_body(&raw.json()?);

        debug!(
            op = "list_notes",
            request_id = %request_id,
            tag = ?tag,
            result_count = notes.len(),
            "notes listed"
        );
        Ok(notes)
    }

    async fn create_note(&self, token: Option<&str>, req: &CreateNoteRequest) -> Result<Note> {
        if req.title.trim().is_empty() {
            return Err(Error::Validation(defaults::TITLE_REQUIRED.to_string()));
        }

        let request_id = new_request_id();
        let http = self
            .build_request(Method::POST, "/notes", token, &request_id)
            .json(req);

        let raw = self
            .send("create_note", &request_id, http)
            .await?
            .error_for_status(Endpoint::Notes)?;
        let note = normalize::created_note_from_body(&raw.json()?)?;

        debug!(op = "create_note", request_id = %request_id, note_id = %note.id, "note created");
        Ok(note)
    }

    async fn delete_note(&self, token: Option<&str>, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::Validation("note id is required".to_string()));
        }

        let request_id = new_request_id();
        let endpoint = format!("/notes/{}", urlencoding::encode(id));
        let req = self.build_request(Method::DELETE, &endpoint, token, &request_id);

        let raw = self.send("delete_note", &request_id, req).await?;
        if raw.status == 404 {
            debug!(op = "delete_note", request_id = %request_id, note_id = id, "note already gone");
            return Ok(());
        }
        raw.error_for_status(Endpoint::Notes)?;

        debug!(op = "delete_note", request_id = %request_id, note_id = id, "note deleted");
        Ok(())
    }
}

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Endpoints;
use crate::errors::AppError;
use crate::models::{AssistantRequest, AudioClip, SpeechRequest, ThematiqueDetail};
use crate::schema::Envelope;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    Default,
    /// Revalidate with the server instead of using a cached copy.
    Bypass,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The browser's `fetch`, reduced to what the front end needs.
/// Only network-level failures are errors; any status is a response.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        cache: CachePolicy,
    ) -> Result<HttpResponse, AppError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, AppError>;
}

/// Client for the detail, assistant and speech endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self { transport, endpoints }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET {detail}?id={id}`; returns the partial record to merge.
    pub async fn fetch_detail(&self, id: &str) -> Result<ThematiqueDetail, AppError> {
        let url = &self.endpoints.detail;
        let resp = self.transport.get(url, &[("id", id)], CachePolicy::Default).await?;
        if !resp.ok() {
            return Err(AppError::HttpStatus { url: url.clone(), status: resp.status });
        }
        Envelope::<ThematiqueDetail>::parse(&resp.body, "data").into_result("thematique detail")
    }

    /// Sends one chat turn. A non-"success" status comes back as
    /// [`AppError::Rejected`] so callers can tell it from a transport failure.
    pub async fn send_chat(&self, request: &AssistantRequest) -> Result<String, AppError> {
        let url = &self.endpoints.assistant;
        let body = serde_json::to_value(request)?;
        debug!("POST {url} action={} language={}", request.action, request.language.code());

        let resp = self.transport.post_json(url, &body).await?;
        if !resp.ok() {
            error!("Assistant request failed with status {}", resp.status);
            return Err(AppError::HttpStatus { url: url.clone(), status: resp.status });
        }
        Envelope::<String>::parse(&resp.body, "message").into_result("assistant")
    }

    /// Requests synthesized speech. On a non-2xx status the JSON body's
    /// `message` becomes the error text.
    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<AudioClip, AppError> {
        let url = &self.endpoints.tts;
        let body = serde_json::to_value(request)?;

        let resp = self.transport.post_json(url, &body).await?;
        if !resp.ok() {
            let message = serde_json::from_slice::<Value>(&resp.body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("Erreur {}", resp.status));
            error!("Speech synthesis failed ({}): {message}", resp.status);
            return Err(AppError::Rejected { message });
        }

        Ok(AudioClip {
            content_type: resp.content_type.unwrap_or_else(|| "audio/mpeg".to_string()),
            bytes: resp.body,
        })
    }
}

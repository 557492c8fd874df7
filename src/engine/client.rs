//! HTTP client for the AI interior endpoint

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;

use crate::config::HomesCanvasConfig;

use super::error::SubmitError;
use super::request::EditRequest;
use super::response::AiResponse;

/// Something that turns an edit request into an AI response
pub trait RenderService {
    fn render(
        &self,
        request: &EditRequest,
    ) -> impl Future<Output = Result<AiResponse, SubmitError>> + Send;
}

#[derive(Clone, Debug)]
pub struct AiClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

/// Error body some failures carry
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl AiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &HomesCanvasConfig) -> anyhow::Result<Self> {
        Self::new(config.endpoint.clone(), config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_transport(&self, err: reqwest::Error) -> SubmitError {
        if err.is_timeout() {
            SubmitError::Timeout(self.timeout)
        } else {
            SubmitError::Transport(err)
        }
    }

    async fn post(&self, request: &EditRequest) -> Result<AiResponse, SubmitError> {
        let form = request.to_form().map_err(SubmitError::Transport)?;
        log::debug!(
            "POST {} ({}x{}, {} circle(s), {} bytes)",
            self.endpoint,
            request.image_width,
            request.image_height,
            request.circles.len(),
            request.image.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error));
            log::warn!("AI service returned HTTP {}: {:?}", status, message);
            return Err(SubmitError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| SubmitError::Malformed(e.to_string()))
    }
}

impl RenderService for AiClient {
    fn render(
        &self,
        request: &EditRequest,
    ) -> impl Future<Output = Result<AiResponse, SubmitError>> + Send {
        self.post(request)
    }
}

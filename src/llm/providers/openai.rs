use crate::llm::client::{async_trait, ChatRequest, ChatTransport, RawReply};
use crate::RiskbriefError;

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl OpenAiTransport {
    pub fn new() -> Self {
        Self::with_endpoint(OPENAI_CHAT_URL)
    }

    /// Point the transport somewhere other than the public API (local test servers)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OpenAiTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_error(err: reqwest::Error) -> RiskbriefError {
    RiskbriefError::RemoteService {
        status: err.status().map(|s| s.as_u16()),
        body: err.to_string(),
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn post_chat(
        &self,
        credential: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, RiskbriefError> {
        tracing::info!("POST {} (model {})", self.endpoint, request.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", credential))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!("Chat endpoint answered {} ({} bytes)", status, body.len());

        Ok(RawReply { status, body })
    }
}

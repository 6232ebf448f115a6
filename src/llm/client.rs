use crate::llm::prompt;
use crate::RiskbriefError;
use serde::{Deserialize, Serialize};

pub const ANALYSIS_MODEL: &str = "gpt-4";
pub const ANALYSIS_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Status and body of a settled HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Deserialize)]
struct ChatEnvelope {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<serde_json::Value>,
}

/// Sends a chat request and hands back the raw reply.
///
/// Transport failures map to `RiskbriefError::RemoteService` with no status.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_chat(
        &self,
        credential: &str,
        request: &ChatRequest,
    ) -> Result<RawReply, RiskbriefError>;
}

/// Build the single-message request for a subject
pub fn build_request(subject_name: &str) -> ChatRequest {
    ChatRequest {
        model: ANALYSIS_MODEL.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt::analysis_prompt(subject_name),
        }],
        temperature: ANALYSIS_TEMPERATURE,
    }
}

/// Extract `choices[0].message.content` from a successful reply body
pub fn parse_envelope(body: &str) -> Result<String, RiskbriefError> {
    let envelope: ChatEnvelope =
        serde_json::from_str(body).map_err(|_| RiskbriefError::MalformedEnvelope)?;

    let content = envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content);

    match content {
        Some(serde_json::Value::String(text)) if !text.is_empty() => Ok(text),
        _ => Err(RiskbriefError::MalformedEnvelope),
    }
}

/// Ask the remote service for an analysis of `subject_name` and parse the reply
pub async fn request_analysis(
    transport: &dyn ChatTransport,
    credential: &str,
    subject_name: &str,
) -> Result<serde_json::Value, RiskbriefError> {
    let request = build_request(subject_name);
    let reply = transport.post_chat(credential, &request).await?;

    if !reply.is_success() {
        return Err(RiskbriefError::RemoteService {
            status: Some(reply.status),
            body: reply.body,
        });
    }

    let content = parse_envelope(&reply.body)?;

    serde_json::from_str(&content).map_err(|e| {
        tracing::debug!("Reply content failed to parse: {}", e);
        RiskbriefError::ResponseNotJson { raw: content }
    })
}

// Re-export async_trait for providers
pub use async_trait::async_trait;

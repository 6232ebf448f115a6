mod client;
pub mod prompt;
mod providers;

pub use client::{
    build_request, parse_envelope, request_analysis, ChatMessage, ChatRequest, ChatTransport,
    RawReply, ANALYSIS_MODEL, ANALYSIS_TEMPERATURE,
};
#[cfg(test)]
pub use client::MockChatTransport;
pub use providers::openai::{OpenAiTransport, OPENAI_CHAT_URL};

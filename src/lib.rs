pub mod config;
pub mod llm;
pub mod pipeline;
pub mod store;
pub mod tui;

pub use config::Config;
pub use pipeline::{AnalysisPipeline, SubmissionInput};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskbriefError {
    #[error("Please fill in all fields.")]
    Validation,

    #[error("Another analysis is already in progress")]
    Busy,

    #[error(
        "OpenAI API error: {} - {body}",
        .status.map_or_else(|| "no response".to_string(), |s| s.to_string())
    )]
    RemoteService { status: Option<u16>, body: String },

    #[error("No message returned from OpenAI.")]
    MalformedEnvelope,

    #[error("Response is not valid JSON:\n{raw}")]
    ResponseNotJson { raw: String },

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RiskbriefError {
    /// Text shown to the user when a submission fails
    pub fn user_message(&self) -> String {
        match self {
            RiskbriefError::Validation => self.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RiskbriefError>;

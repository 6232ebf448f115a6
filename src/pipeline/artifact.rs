use crate::RiskbriefError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

static INVALID_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap());

/// Name of the artifact produced for a subject
pub fn artifact_name(subject_name: &str) -> String {
    format!("{}_analysis.json", subject_name)
}

/// Pretty-print the parsed reply with two-space indentation
pub fn render_artifact(value: &serde_json::Value) -> Result<String, RiskbriefError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Replace characters that can't appear in a file name with `_`
pub fn sanitize_file_name(name: &str) -> String {
    INVALID_FILE_CHARS.replace_all(name, "_").to_string()
}

/// Destination for the finished artifact
#[async_trait::async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn emit(&self, filename: &str, content: &str) -> Result<(), RiskbriefError>;
}

/// Writes artifacts as files in a directory
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.directory.join(sanitize_file_name(filename))
    }
}

#[async_trait::async_trait]
impl ArtifactSink for DirectorySink {
    async fn emit(&self, filename: &str, content: &str) -> Result<(), RiskbriefError> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            RiskbriefError::Artifact(format!(
                "Failed to create {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let path = self.path_for(filename);
        tokio::fs::write(&path, content).await.map_err(|e| {
            RiskbriefError::Artifact(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!("Wrote artifact to {:?}", path);
        Ok(())
    }
}

/// Writes artifacts to standard output
pub struct StdoutSink;

#[async_trait::async_trait]
impl ArtifactSink for StdoutSink {
    async fn emit(&self, filename: &str, content: &str) -> Result<(), RiskbriefError> {
        tracing::info!("Writing {} to stdout", filename);

        let mut stdout = tokio::io::stdout();
        stdout.write_all(content.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

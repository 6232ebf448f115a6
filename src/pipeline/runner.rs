use super::artifact::{artifact_name, render_artifact, ArtifactSink};
use super::input::SubmissionInput;
use super::notify::{NoticeKind, Notifier};
use crate::llm::{self, ChatTransport};
use crate::store::{self, KeyValueStore, CREDENTIAL_KEY};
use crate::RiskbriefError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const SUCCESS_MESSAGE: &str = "JSON file downloaded.";

/// Shared "a submission is running" flag
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Flip idle -> loading. `None` if a submission already holds the flag.
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard { flag: self.clone() })
    }
}

/// Resets the loading flag when dropped
pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.0.store(false, Ordering::SeqCst);
    }
}

pub struct AnalysisPipeline {
    store: Arc<dyn KeyValueStore>,
    transport: Arc<dyn ChatTransport>,
    sink: Arc<dyn ArtifactSink>,
    notifier: Arc<dyn Notifier>,
    loading: LoadingFlag,
}

impl AnalysisPipeline {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn ChatTransport>,
        sink: Arc<dyn ArtifactSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            transport,
            sink,
            notifier,
            loading: LoadingFlag::new(),
        }
    }

    /// Share an existing flag with the host UI
    pub fn with_loading_flag(mut self, loading: LoadingFlag) -> Self {
        self.loading = loading;
        self
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Credential from the last submission, used to prefill the form
    pub async fn saved_credential(&self) -> Option<String> {
        store::load_saved_credential(self.store.as_ref()).await
    }

    /// Run one submission end to end and notify the user exactly once.
    ///
    /// Returns the artifact name on success. A submission that arrives while
    /// another is running fails with `RiskbriefError::Busy` and has no side
    /// effects beyond its notification.
    pub async fn submit(
        &self,
        subject_name: &str,
        credential: &str,
    ) -> Result<String, RiskbriefError> {
        let Some(_guard) = self.loading.try_begin() else {
            let err = RiskbriefError::Busy;
            tracing::warn!("Rejected submission while another is running");
            self.notifier.notify(&err.user_message(), NoticeKind::Error);
            return Err(err);
        };

        let outcome = self.run(subject_name, credential).await;

        match &outcome {
            Ok(filename) => {
                tracing::info!("Analysis complete: {}", filename);
                self.notifier.notify(SUCCESS_MESSAGE, NoticeKind::Info);
            }
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                self.notifier.notify(&e.user_message(), NoticeKind::Error);
            }
        }

        outcome
    }

    async fn run(&self, subject_name: &str, credential: &str) -> Result<String, RiskbriefError> {
        let input = SubmissionInput::new(subject_name, credential)?;

        // Saving is best effort; the request goes out either way
        if let Err(e) = self.store.set(CREDENTIAL_KEY, input.credential()).await {
            tracing::warn!("Could not save credential: {}", e);
        }

        tracing::info!("Requesting analysis for: {}", input.subject_name());
        let value = llm::request_analysis(
            self.transport.as_ref(),
            input.credential(),
            input.subject_name(),
        )
        .await?;

        let filename = artifact_name(input.subject_name());
        let content = render_artifact(&value)?;
        self.sink.emit(&filename, &content).await?;

        Ok(filename)
    }
}

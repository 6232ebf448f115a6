//! The submission pipeline: validate, persist the credential, ask the remote
//! service, emit the parsed result, notify once.

mod artifact;
mod input;
mod notify;
mod runner;

pub use artifact::{
    artifact_name, render_artifact, sanitize_file_name, ArtifactSink, DirectorySink, StdoutSink,
};
pub use input::SubmissionInput;
pub use notify::{ConsoleNotifier, NoticeKind, Notifier};
pub use runner::{AnalysisPipeline, LoadingFlag, LoadingGuard, SUCCESS_MESSAGE};

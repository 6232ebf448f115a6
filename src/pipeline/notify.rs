#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Reports the outcome of a submission to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NoticeKind);
}

/// Prints notices to the terminal (stderr for errors)
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Info => println!("{}", message),
            NoticeKind::Error => eprintln!("{}", message),
        }
    }
}

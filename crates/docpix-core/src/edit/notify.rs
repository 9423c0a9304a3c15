use tracing::{error, info, warn};

use crate::error::Severity;

/// Receiver for user-facing messages, registered when a session is created.
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(Severity, &str),
{
    fn notify(&self, severity: Severity, message: &str) {
        self(severity, message)
    }
}

/// Sends notifications to the tracing log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => info!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}

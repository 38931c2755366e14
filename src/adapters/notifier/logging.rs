//! Logging Notifier - acknowledgment delivery via the log stream.
//!
//! Stands in for the platform's directive channel in local drivers and
//! deployments without one.

use async_trait::async_trait;
use tracing::info;

use crate::domain::dialog::AckDirective;
use crate::ports::{NotifyError, ProgressNotifier};

/// Notifier that records acknowledgments in the log stream.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    /// Creates a logging notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressNotifier for LoggingNotifier {
    async fn notify(&self, ack: &AckDirective) -> Result<(), NotifyError> {
        info!(request_id = %ack.request_id, speech = %ack.speech, "acknowledgment dispatched");
        Ok(())
    }
}

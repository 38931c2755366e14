//! Recording Notifier - captures acknowledgments for assertions.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::dialog::AckDirective;
use crate::ports::{NotifyError, ProgressNotifier};

/// Notifier that records every acknowledgment it is asked to deliver.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<AckDirective>>,
    failing: bool,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier whose deliveries all fail.
    pub fn failing() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Returns the acknowledgments delivered so far.
    pub fn delivered(&self) -> Vec<AckDirective> {
        self.delivered.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl ProgressNotifier for RecordingNotifier {
    async fn notify(&self, ack: &AckDirective) -> Result<(), NotifyError> {
        if self.failing {
            return Err(NotifyError::delivery("recording notifier set to fail"));
        }
        self.delivered
            .lock()
            .expect("mock lock poisoned")
            .push(ack.clone());
        Ok(())
    }
}

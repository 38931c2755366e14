//! Progress Notifier Port - Out-of-band acknowledgment delivery.
//!
//! The answer lookup can far exceed the platform's turn-response budget,
//! so the engine pushes a "please wait" acknowledgment before starting the
//! lookup. Delivery is fire-and-forget: the acknowledgment carries no
//! state, and a failed delivery never fails the turn.

use async_trait::async_trait;

use crate::domain::dialog::AckDirective;

/// Port for delivering out-of-band acknowledgments to the voice platform.
#[async_trait]
pub trait ProgressNotifier: Send + Sync {
    /// Delivers an acknowledgment addressed to the original request.
    async fn notify(&self, ack: &AckDirective) -> Result<(), NotifyError>;
}

/// Acknowledgment delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The platform's directive channel rejected or dropped the push.
    #[error("acknowledgment delivery failed: {0}")]
    Delivery(String),
}

impl NotifyError {
    /// Creates a delivery error.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery(message.into())
    }
}

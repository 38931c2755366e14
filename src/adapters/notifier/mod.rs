//! Progress notifier adapters.

mod logging;
mod mock;

pub use logging::LoggingNotifier;
pub use mock::RecordingNotifier;

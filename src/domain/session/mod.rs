//! Per-conversation session state.

mod state;

pub use state::{ContinuationSlot, QuestionScope, SessionState, SpecializationSlot};

//! Application layer: per-turn orchestration of the dialog engine.

mod dialog_service;

pub use dialog_service::{DialogService, EngineError};

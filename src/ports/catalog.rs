//! Catalog Client Port - Interface to the remote advising service.
//!
//! The catalog service owns the faculty/program/specialization hierarchy
//! and the question-answering pipeline. The engine only sees this contract;
//! transport, authentication, and retries live in the adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the remote advising catalog and answering service.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Lists all faculties.
    async fn faculties(&self) -> Result<Vec<String>, CatalogError>;

    /// Lists the programs offered by a faculty.
    async fn programs(&self, faculty: &str) -> Result<Vec<String>, CatalogError>;

    /// Lists the specializations of a program.
    async fn specializations(
        &self,
        faculty: &str,
        program: &str,
    ) -> Result<Vec<String>, CatalogError>;

    /// Submits a question for answering.
    ///
    /// This is the one long-latency call in the system; implementations
    /// must enforce the configured answer timeout at their boundary.
    async fn submit_question(&self, query: &AnswerQuery) -> Result<AnswerReply, CatalogError>;
}

/// A fully-assembled question lookup.
///
/// Specialization and year are sent empty unless the question is
/// program-specific.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerQuery {
    pub faculty: String,
    pub program: String,
    pub specialization: String,
    pub year: String,
    pub topic: String,
    pub question: String,
}

impl AnswerQuery {
    /// Creates a general-scope query; specialization and year stay empty.
    pub fn new(
        faculty: impl Into<String>,
        program: impl Into<String>,
        topic: impl Into<String>,
        question: impl Into<String>,
    ) -> Self {
        Self {
            faculty: faculty.into(),
            program: program.into(),
            specialization: String::new(),
            year: String::new(),
            topic: topic.into(),
            question: question.into(),
        }
    }

    /// Sets the specialization for a program-specific query.
    pub fn with_specialization(mut self, specialization: impl Into<String>) -> Self {
        self.specialization = specialization.into();
        self
    }

    /// Sets the year level for a program-specific query.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }
}

/// The answering service's reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerReply {
    /// The generated answer, absent when the service found none.
    pub main_response: Option<String>,
}

impl AnswerReply {
    /// Returns the answer text, treating an empty string as no answer.
    pub fn answer(&self) -> Option<&str> {
        self.main_response.as_deref().filter(|s| !s.is_empty())
    }
}

/// Catalog service errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request exceeded its timeout bound.
    #[error("catalog request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Network failure reaching the service.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a server-side failure.
    #[error("catalog unavailable: {message}")]
    Unavailable { message: String },

    /// The service rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this failure was the timeout bound firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Network(_) | Self::Unavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_query_leaves_specialization_and_year_empty() {
        let query = AnswerQuery::new("Engineering", "Computer Science", "course load", "How many?");
        assert_eq!(query.specialization, "");
        assert_eq!(query.year, "");
    }

    #[test]
    fn specific_query_carries_specialization_and_year() {
        let query = AnswerQuery::new("Engineering", "Computer Science", "course load", "How many?")
            .with_specialization("Software Engineering")
            .with_year("Third Year");
        assert_eq!(query.specialization, "Software Engineering");
        assert_eq!(query.year, "Third Year");
    }

    #[test]
    fn reply_treats_empty_string_as_no_answer() {
        let reply = AnswerReply {
            main_response: Some(String::new()),
        };
        assert_eq!(reply.answer(), None);

        let reply = AnswerReply {
            main_response: Some("Up to eighteen credits.".to_string()),
        };
        assert_eq!(reply.answer(), Some("Up to eighteen credits."));

        let reply = AnswerReply { main_response: None };
        assert_eq!(reply.answer(), None);
    }

    #[test]
    fn reply_deserializes_null_answer() {
        let reply: AnswerReply = serde_json::from_str("{\"main_response\":null}").unwrap();
        assert_eq!(reply.answer(), None);
    }

    #[test]
    fn error_retryable_classification() {
        assert!(CatalogError::timeout(180).is_retryable());
        assert!(CatalogError::network("connection reset").is_retryable());
        assert!(CatalogError::unavailable("503").is_retryable());

        assert!(!CatalogError::parse("bad json").is_retryable());
        assert!(!CatalogError::InvalidRequest("missing faculty".to_string()).is_retryable());
    }

    #[test]
    fn timeout_is_distinguishable() {
        assert!(CatalogError::timeout(180).is_timeout());
        assert!(!CatalogError::network("reset").is_timeout());
    }

    #[test]
    fn errors_display_with_context() {
        assert_eq!(
            CatalogError::timeout(180).to_string(),
            "catalog request timed out after 180s"
        );
        assert_eq!(
            CatalogError::unavailable("server error 503").to_string(),
            "catalog unavailable: server error 503"
        );
    }
}

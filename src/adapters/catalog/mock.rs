//! Mock Catalog Client - in-memory implementation for tests and offline
//! development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{AnswerQuery, AnswerReply, CatalogClient, CatalogError};

/// How the mock answers submitted questions.
#[derive(Debug, Clone)]
enum AnswerBehavior {
    Answer(String),
    NoAnswer,
    Timeout,
    Unavailable,
}

/// Catalog client serving canned data.
pub struct MockCatalogClient {
    faculties: Vec<String>,
    programs: HashMap<String, Vec<String>>,
    specializations: HashMap<(String, String), Vec<String>>,
    answer: AnswerBehavior,
    queries: Mutex<Vec<AnswerQuery>>,
}

impl MockCatalogClient {
    /// Creates an empty mock with no answer configured.
    pub fn new() -> Self {
        Self {
            faculties: Vec::new(),
            programs: HashMap::new(),
            specializations: HashMap::new(),
            answer: AnswerBehavior::NoAnswer,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Sets the faculty list.
    pub fn with_faculties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.faculties = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the programs of a faculty.
    pub fn with_programs<I, S>(mut self, faculty: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.programs
            .insert(faculty.into(), names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the specializations of a program.
    pub fn with_specializations<I, S>(
        mut self,
        faculty: impl Into<String>,
        program: impl Into<String>,
        names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations.insert(
            (faculty.into(), program.into()),
            names.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Answers every question with the given text.
    pub fn with_answer(mut self, text: impl Into<String>) -> Self {
        self.answer = AnswerBehavior::Answer(text.into());
        self
    }

    /// Answers every question with no answer found.
    pub fn with_no_answer(mut self) -> Self {
        self.answer = AnswerBehavior::NoAnswer;
        self
    }

    /// Makes every question lookup hit the timeout bound.
    pub fn with_answer_timeout(mut self) -> Self {
        self.answer = AnswerBehavior::Timeout;
        self
    }

    /// Makes every question lookup fail as unavailable.
    pub fn with_answer_unavailable(mut self) -> Self {
        self.answer = AnswerBehavior::Unavailable;
        self
    }

    /// Returns every query submitted so far.
    pub fn submitted_queries(&self) -> Vec<AnswerQuery> {
        self.queries.lock().expect("mock lock poisoned").clone()
    }
}

impl Default for MockCatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogClient for MockCatalogClient {
    async fn faculties(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.faculties.clone())
    }

    async fn programs(&self, faculty: &str) -> Result<Vec<String>, CatalogError> {
        Ok(self.programs.get(faculty).cloned().unwrap_or_default())
    }

    async fn specializations(
        &self,
        faculty: &str,
        program: &str,
    ) -> Result<Vec<String>, CatalogError> {
        Ok(self
            .specializations
            .get(&(faculty.to_string(), program.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_question(&self, query: &AnswerQuery) -> Result<AnswerReply, CatalogError> {
        self.queries
            .lock()
            .expect("mock lock poisoned")
            .push(query.clone());

        match &self.answer {
            AnswerBehavior::Answer(text) => Ok(AnswerReply {
                main_response: Some(text.clone()),
            }),
            AnswerBehavior::NoAnswer => Ok(AnswerReply {
                main_response: None,
            }),
            AnswerBehavior::Timeout => Err(CatalogError::timeout(180)),
            AnswerBehavior::Unavailable => {
                Err(CatalogError::unavailable("mock catalog unavailable"))
            }
        }
    }
}

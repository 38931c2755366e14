//! HTTP Catalog Client - reqwest implementation of the catalog port.
//!
//! List endpoints return JSON arrays of names; the question endpoint
//! returns `{ "main_response": string|null }`. The answer lookup gets a
//! per-request timeout override, so the configured bound is enforced here
//! at the collaborator boundary rather than inside the dialog machine.

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::ports::{AnswerQuery, AnswerReply, CatalogClient, CatalogError};

/// Catalog client backed by the advising service's HTTP API.
pub struct HttpCatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl HttpCatalogClient {
    /// Creates a client from the catalog configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CatalogError::network(format!("client construction failed: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds an endpoint URL under the configured base.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetches a JSON array of names from a list endpoint.
    async fn fetch_names(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<String>, CatalogError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, self.config.request_timeout_secs))?;

        let response = Self::check_status(response).await?;
        let names: Vec<String> = response
            .json()
            .await
            .map_err(|e| CatalogError::parse(e.to_string()))?;

        debug!(path, count = names.len(), "catalog list fetched");
        Ok(names)
    }

    /// Maps reqwest send failures onto the port's error taxonomy.
    fn map_send_error(&self, error: reqwest::Error, timeout_secs: u64) -> CatalogError {
        if error.is_timeout() {
            CatalogError::timeout(timeout_secs)
        } else if error.is_connect() {
            CatalogError::network(format!("connection failed: {}", error))
        } else {
            CatalogError::network(error.to_string())
        }
    }

    /// Converts non-success statuses into errors.
    async fn check_status(response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            Err(CatalogError::unavailable(format!(
                "server error {}: {}",
                status, body
            )))
        } else {
            Err(CatalogError::InvalidRequest(format!(
                "status {}: {}",
                status, body
            )))
        }
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn faculties(&self) -> Result<Vec<String>, CatalogError> {
        self.fetch_names("faculties", &[]).await
    }

    async fn programs(&self, faculty: &str) -> Result<Vec<String>, CatalogError> {
        self.fetch_names("programs", &[("faculty", faculty)]).await
    }

    async fn specializations(
        &self,
        faculty: &str,
        program: &str,
    ) -> Result<Vec<String>, CatalogError> {
        self.fetch_names(
            "specializations",
            &[("faculty", faculty), ("program", program)],
        )
        .await
    }

    async fn submit_question(&self, query: &AnswerQuery) -> Result<AnswerReply, CatalogError> {
        let timeout = self.config.answer_timeout();
        let timeout_secs = self.config.answer_timeout_secs;
        let timeout_param = timeout_secs.to_string();

        let response = self
            .client
            .get(self.endpoint("question"))
            .query(&[
                ("faculty", query.faculty.as_str()),
                ("program", query.program.as_str()),
                ("specialization", query.specialization.as_str()),
                ("year", query.year.as_str()),
                ("topic", query.topic.as_str()),
                ("question", query.question.as_str()),
                ("timeout", timeout_param.as_str()),
            ])
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e, timeout_secs))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| CatalogError::parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpCatalogClient {
        HttpCatalogClient::new(CatalogConfig::new("http://advising.example.com/")).unwrap()
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            client().endpoint("faculties"),
            "http://advising.example.com/faculties"
        );
    }

    #[test]
    fn construction_succeeds_with_default_config() {
        assert!(HttpCatalogClient::new(CatalogConfig::new("http://localhost:8080")).is_ok());
    }
}

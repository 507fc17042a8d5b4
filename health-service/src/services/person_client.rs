use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use service_core::error::AppError;

use crate::config::PersonServiceSettings;
use crate::models::Person;

/// Outcome of an existence probe against the person registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonLookup {
    Exists,
    NotFound,
    /// The registry could not be asked at all (timeout or transport
    /// failure). Single-entity callers collapse this into the not-found
    /// path, so "don't know" is answered like "doesn't exist".
    Unreachable,
}

/// HTTP client for the person registry. The caller's `Authorization` header
/// is forwarded unchanged on every call; this service holds no credential
/// of its own.
pub struct PersonClient {
    client: Client,
    base_url: String,
}

impl PersonClient {
    pub fn new(settings: &PersonServiceSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        }
    }

    /// Probe `GET /persons/{id}`. 200 means the person exists; any other
    /// status means it does not.
    pub async fn exists(&self, person_id: i64, authorization: &str) -> PersonLookup {
        let url = format!("{}/persons/{}", self.base_url, person_id);

        match self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => PersonLookup::Exists,
            Ok(response) => {
                tracing::debug!(person_id, status = %response.status(), "person lookup miss");
                PersonLookup::NotFound
            }
            Err(e) => {
                tracing::warn!(person_id, error = %e, "person service unreachable");
                PersonLookup::Unreachable
            }
        }
    }

    /// Fetch the full registry for the aggregation path.
    pub async fn list(&self, authorization: &str) -> Result<Vec<Person>, AppError> {
        let url = format!("{}/persons", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "person service unreachable");
                AppError::BadGateway("unable to fetch persons".to_string())
            })?;

        if response.status() != StatusCode::OK {
            tracing::warn!(status = %response.status(), "person list request failed");
            return Err(AppError::BadGateway("unable to fetch persons".to_string()));
        }

        response.json::<Vec<Person>>().await.map_err(|e| {
            tracing::warn!(error = %e, "person list body was not valid JSON");
            AppError::BadGateway("unable to fetch persons".to_string())
        })
    }
}

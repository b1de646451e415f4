//! HTTP client for the roster provider (school information system).
//!
//! Every pull either returns the complete record set for the requested
//! resource or fails; the sync engine must never run against partial
//! source data.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{HomeroomError, Result};
use crate::models::{ClassRecord, EnrollmentRecord, PersonRecord};

/// Read-only access to the four roster record sets.
///
/// `updated_after` bounds the pull to records changed on or after the given
/// date; `None` requests the full set.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn classes(&self, updated_after: Option<NaiveDate>) -> Result<Vec<ClassRecord>>;
    async fn students(&self, updated_after: Option<NaiveDate>) -> Result<Vec<PersonRecord>>;
    async fn facstaff(&self, updated_after: Option<NaiveDate>) -> Result<Vec<PersonRecord>>;
    async fn enrollments(&self, updated_after: Option<NaiveDate>)
        -> Result<Vec<EnrollmentRecord>>;
}

/// Roster API client using HTTP basic authentication.
pub struct RosterClient {
    http: Client,
    base_url: String,
    username: String,
    password: String,
}

impl RosterClient {
    pub fn new(
        base_url: &str,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Fetch one resource as a JSON array of records.
    async fn pull<T: DeserializeOwned>(
        &self,
        resource: &str,
        updated_after: Option<NaiveDate>,
    ) -> Result<Vec<T>> {
        let url = format!("{}/{resource}", self.base_url);
        debug!(url = %url, updated_after = ?updated_after, "Pulling roster resource");

        let mut req = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password));

        if let Some(date) = updated_after {
            req = req.query(&[("updated_after", date.to_string())]);
        }

        let response = req.send().await.map_err(|e| {
            HomeroomError::Roster(format!("pull of {resource} failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, resource = %resource, "Roster pull failed");
            return Err(HomeroomError::Roster(format!(
                "pull of {resource} failed with status {status}: {body}"
            )));
        }

        let records: Vec<T> = response.json().await.map_err(|e| {
            HomeroomError::Roster(format!("failed to decode {resource} response: {e}"))
        })?;

        debug!(resource = %resource, count = records.len(), "Roster pull complete");
        Ok(records)
    }
}

#[async_trait]
impl RosterProvider for RosterClient {
    async fn classes(&self, updated_after: Option<NaiveDate>) -> Result<Vec<ClassRecord>> {
        self.pull("classes", updated_after).await
    }

    async fn students(&self, updated_after: Option<NaiveDate>) -> Result<Vec<PersonRecord>> {
        self.pull("students", updated_after).await
    }

    async fn facstaff(&self, updated_after: Option<NaiveDate>) -> Result<Vec<PersonRecord>> {
        self.pull("facstaff", updated_after).await
    }

    async fn enrollments(
        &self,
        updated_after: Option<NaiveDate>,
    ) -> Result<Vec<EnrollmentRecord>> {
        self.pull("enrollments", updated_after).await
    }
}

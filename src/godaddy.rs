//! GoDaddy API client
//!
//! Everything else in the crate talks to the registrar through the
//! [`DnsApi`] trait, so operations and the HTTP server can be exercised
//! against a mock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Credentials;

pub const DEFAULT_API_BASE: &str = "https://api.godaddy.com";

/// Default record TTL in seconds.
pub const DEFAULT_TTL: u32 = 3600;

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// A DNS record as the registrar reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

/// Failures surfaced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The registrar answered with a non-success status. The message text
    /// is passed through verbatim.
    #[error("{message}")]
    Status { code: u16, message: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// The registrar operations the rest of the crate depends on.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// Domain names registered to the account.
    async fn list_domains(&self) -> Result<Vec<String>, ApiError>;

    /// Records for a domain, optionally narrowed by type and/or name.
    async fn list_records(
        &self,
        domain: &str,
        record_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Record>, ApiError>;

    /// Adds a record to the domain's record set.
    async fn create_record(&self, domain: &str, record: &Record) -> Result<(), ApiError>;

    /// Replaces the data held by the records addressed by (type, name).
    async fn upsert_record_value(
        &self,
        value: &str,
        domain: &str,
        name: &str,
        record_type: &str,
    ) -> Result<(), ApiError>;

    /// Deletes every record matching the filters. The read happens first;
    /// when it matches nothing, no delete request is issued. Returns how
    /// many records the read step matched.
    async fn delete_records(
        &self,
        domain: &str,
        name: Option<&str>,
        record_type: Option<&str>,
    ) -> Result<usize, ApiError>;
}

/// reqwest-backed client for the GoDaddy v1 API.
pub struct GoDaddyClient {
    client: reqwest::Client,
    base_url: String,
    auth: String,
}

impl GoDaddyClient {
    /// Builds a client against the production API, honoring the
    /// `GODADDY_API_URL` override.
    pub fn new(credentials: &Credentials) -> Self {
        let base_url =
            std::env::var("GODADDY_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::with_base_url(credentials, base_url)
    }

    pub fn with_base_url(credentials: &Credentials, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("static reqwest configuration");
        Self {
            client,
            base_url: base_url.into(),
            auth: format!("sso-key {}:{}", credentials.key, credentials.secret),
        }
    }

    /// `/v1/domains/{domain}/records[/{type}[/{name}]]`. The name segment
    /// is only addressable underneath a type segment.
    fn records_path(domain: &str, record_type: Option<&str>, name: Option<&str>) -> String {
        let mut path = format!("/v1/domains/{}/records", urlencoding::encode(domain));
        if let Some(t) = record_type {
            path.push('/');
            path.push_str(&urlencoding::encode(t));
            if let Some(n) = name {
                path.push('/');
                path.push_str(&urlencoding::encode(n));
            }
        }
        path
    }

    fn status_error(status: StatusCode, body: &str) -> ApiError {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.trim().to_string()
                }
            });
        ApiError::Status {
            code: status.as_u16(),
            message,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.auth.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("response status {status}");
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Sends a body-carrying or bodiless request where only the status
    /// matters.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{method} {url}");

        let mut request = self
            .client
            .request(method, &url)
            .header(header::AUTHORIZATION, self.auth.as_str());
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("response status {status}");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body));
        }
        Ok(())
    }
}

#[async_trait]
impl DnsApi for GoDaddyClient {
    async fn list_domains(&self) -> Result<Vec<String>, ApiError> {
        #[derive(Deserialize)]
        struct DomainSummary {
            domain: String,
        }

        let summaries: Vec<DomainSummary> = self.get_json("/v1/domains").await?;
        Ok(summaries.into_iter().map(|s| s.domain).collect())
    }

    async fn list_records(
        &self,
        domain: &str,
        record_type: Option<&str>,
        name: Option<&str>,
    ) -> Result<Vec<Record>, ApiError> {
        let path = Self::records_path(domain, record_type, name);
        let mut records: Vec<Record> = self.get_json(&path).await?;

        // A name filter without a type has no path form; narrow here.
        if record_type.is_none() {
            if let Some(n) = name {
                records.retain(|r| r.name == n);
            }
        }
        Ok(records)
    }

    async fn create_record(&self, domain: &str, record: &Record) -> Result<(), ApiError> {
        let path = Self::records_path(domain, None, None);
        self.send(Method::PATCH, &path, Some(&[record])).await
    }

    async fn upsert_record_value(
        &self,
        value: &str,
        domain: &str,
        name: &str,
        record_type: &str,
    ) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct UpsertBody<'a> {
            data: &'a str,
            ttl: u32,
        }

        let path = Self::records_path(domain, Some(record_type), Some(name));
        let body = [UpsertBody {
            data: value,
            ttl: DEFAULT_TTL,
        }];
        self.send(Method::PUT, &path, Some(&body)).await
    }

    async fn delete_records(
        &self,
        domain: &str,
        name: Option<&str>,
        record_type: Option<&str>,
    ) -> Result<usize, ApiError> {
        let matched = self.list_records(domain, record_type, name).await?;
        if matched.is_empty() {
            return Ok(0);
        }

        if record_type.is_none() && name.is_some() {
            // Name-only filters aren't addressable as a path; delete each
            // matched record individually.
            for record in &matched {
                let path =
                    Self::records_path(domain, Some(&record.record_type), Some(&record.name));
                self.send::<()>(Method::DELETE, &path, None).await?;
            }
        } else {
            let path = Self::records_path(domain, record_type, name);
            self.send::<()>(Method::DELETE, &path, None).await?;
        }
        Ok(matched.len())
    }
}

//! OMDb API provider.
//!
//! Looks titles up with `GET {base_url}/?t={title}&apikey={key}`. OMDb
//! answers unknown titles with HTTP 200 and a body like
//! `{"Response":"False","Error":"Movie not found!"}`, so a missing `Title`
//! is treated as `NoMatch` rather than success.

use crate::{MetadataError, MetadataProvider, MovieMetadata, Result, UNAVAILABLE};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw OMDb response body
#[derive(Debug, Deserialize)]
pub(crate) struct OmdbResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbResponse {
    /// Convert into metadata; `query` is only used for the error message
    pub(crate) fn into_metadata(self, query: &str) -> Result<MovieMetadata> {
        let title = self.title.ok_or_else(|| MetadataError::NoMatch {
            title: query.to_string(),
            reason: self.error.unwrap_or_else(|| "response has no Title".to_string()),
        })?;

        let or_na = |field: Option<String>| field.unwrap_or_else(|| UNAVAILABLE.to_string());
        Ok(MovieMetadata {
            title,
            year: or_na(self.year),
            runtime: or_na(self.runtime),
            imdb_rating: or_na(self.imdb_rating),
            poster: or_na(self.poster),
        })
    }
}

/// OMDb-backed metadata provider
#[derive(Clone)]
pub struct OmdbClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OmdbClient {
    /// Create a client for the public OMDb endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at another endpoint (default: http://www.omdbapi.com)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn fetch(&self, title: &str) -> Result<MovieMetadata> {
        debug!("Fetching OMDb metadata for '{}'", title);

        let response = self
            .http_client
            .get(format!("{}/", self.base_url))
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                status: status.as_u16(),
            });
        }

        let body: OmdbResponse = response.json().await?;
        body.into_metadata(title)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

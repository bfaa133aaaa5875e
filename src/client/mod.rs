//! HTTP fetch step — GET a JSON payload with a bounded timeout and a
//! one-shot retry against an alternate public base URL.
//!
//! The primary request goes through `<primary_base><path>`; the primary base
//! may be empty, in which case a same-origin rewrite layer outside this
//! crate is assumed. If the primary attempt fails for any reason and a
//! public base URL is configured, the same root-relative path is retried
//! once against `<public_base><path>`. Failures of the alternate attempt
//! propagate to the caller, which owns the remaining fallback tiers.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

/// Hard deadline for a single request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors produced by a fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("fetch cancelled before completion")]
    Cancelled,
}

/// A successful fetch, annotated with which base URL served it.
#[derive(Debug)]
pub struct Fetched {
    /// The parsed (but not yet normalized) response payload.
    pub payload: Value,
    /// `true` if the alternate public base answered after the primary failed.
    pub via_alternate: bool,
}

/// JSON GET client with the alternate-base retry built in.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
    primary_base: String,
    public_base: Option<String>,
}

impl HttpFetcher {
    /// Builds a fetcher from the resolved API configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            primary_base: config.api_base().to_owned(),
            public_base: config.public_base().map(str::to_owned),
        })
    }

    /// GETs `path` as JSON, retrying once against the public base on failure.
    ///
    /// # Errors
    ///
    /// The error of the *last* attempt made: the alternate attempt's error
    /// when a retry happened, otherwise the primary attempt's.
    pub async fn get_json(&self, path: &str) -> Result<Fetched, FetchError> {
        let primary_url = compose_url(&self.primary_base, path);
        match self.try_get(&primary_url).await {
            Ok(payload) => Ok(Fetched {
                payload,
                via_alternate: false,
            }),
            Err(e) => {
                // Only root-relative paths can be re-rooted onto the public base.
                let Some(public_base) = self.public_base.as_deref() else {
                    return Err(e);
                };
                if !path.starts_with('/') {
                    return Err(e);
                }
                warn!(path, error = %e, "primary fetch failed — retrying against public base");
                let alternate_url = compose_url(public_base, path);
                let payload = self.try_get(&alternate_url).await?;
                Ok(Fetched {
                    payload,
                    via_alternate: true,
                })
            }
        }
    }

    /// One GET attempt: status check, then JSON parse.
    async fn try_get(&self, url: &str) -> Result<Value, FetchError> {
        debug!(url, "fetching");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(FetchError::Network)?;
        serde_json::from_str(&text).map_err(FetchError::InvalidBody)
    }
}

/// Joins a base URL and a root-relative path without doubling slashes.
fn compose_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_plain() {
        assert_eq!(
            compose_url("http://api.example.com", "/api/marcas"),
            "http://api.example.com/api/marcas"
        );
    }

    #[test]
    fn compose_trims_trailing_slash() {
        assert_eq!(
            compose_url("http://api.example.com/", "/api/veiculos"),
            "http://api.example.com/api/veiculos"
        );
    }

    #[test]
    fn compose_empty_base_keeps_path() {
        assert_eq!(compose_url("", "/api/marcas"), "/api/marcas");
    }

    #[test]
    fn request_failed_display_carries_status_and_body() {
        let e = FetchError::RequestFailed {
            status: 503,
            body: "down for maintenance".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("down for maintenance"));
    }
}

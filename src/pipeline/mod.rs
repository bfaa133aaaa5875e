//! The fetch-normalize-fallback pipeline.
//!
//! [`Resolver::resolve`] turns a [`Resource`] into a normalized record
//! array, trying in order:
//!
//! 1. the per-session cache,
//! 2. the primary endpoint (`<api_base>/api/<resource>`),
//! 3. the alternate public base URL (handled inside the fetch step),
//! 4. the static mock payload.
//!
//! The pipeline is tolerant by design: no failure crosses its boundary as an
//! `Err`. Every path ends in a [`Resolution`] whose `records` field is a
//! valid (possibly empty) array, with provenance and an optional
//! human-readable notice describing any degradation.

use parking_lot::Mutex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::cache::RecordCache;
use crate::client::{FetchError, Fetched, HttpFetcher};
use crate::config::ApiConfig;
use crate::mock::MockStore;
use crate::normalize::extract_records;
use crate::resource::Resource;

/// Where a resolution's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served from the per-session cache; no network I/O happened.
    Cache,
    /// Fetched from the primary endpoint.
    Primary,
    /// Fetched from the alternate public base after the primary failed.
    AlternateBase,
    /// All network tiers failed; records are the static mock payload.
    Mock,
    /// The cancellation token fired before a result was obtained.
    Cancelled,
    /// Every tier failed, including the mock. Records are empty.
    Exhausted,
}

impl Source {
    /// Returns `true` if the records did not come from a live endpoint or
    /// the cache of one.
    pub fn is_degraded(self) -> bool {
        matches!(self, Self::Mock | Self::Cancelled | Self::Exhausted)
    }
}

/// The outcome of resolving one resource. Always renderable: `records` is
/// never null and never a non-array.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The normalized record array, possibly empty.
    pub records: Vec<Value>,
    /// Which tier produced the records.
    pub source: Source,
    /// Human-readable degradation notice, set for mock and exhausted
    /// outcomes.
    pub notice: Option<String>,
}

/// Resolves resources to record arrays through the layered fallback chain.
///
/// One `Resolver` corresponds to one page session: its cache lives exactly
/// as long as it does. The cache is behind a mutex so the two catalog
/// resources can be resolved concurrently from a shared reference.
///
/// # Examples
///
/// ```rust,no_run
/// use vitrine::config::ApiConfig;
/// use vitrine::pipeline::Resolver;
/// use vitrine::resource::Resource;
///
/// # async fn demo() -> Result<(), reqwest::Error> {
/// let resolver = Resolver::new(&ApiConfig::new("http://localhost:3001"))?;
/// let resolution = resolver.resolve(Resource::Marcas).await;
/// for record in &resolution.records {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Resolver {
    fetcher: HttpFetcher,
    mocks: MockStore,
    cache: Mutex<RecordCache>,
    cancel: CancellationToken,
}

impl Resolver {
    /// Creates a resolver for the given API configuration.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the HTTP client cannot be
    /// built.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mocks = match config.mock_dir() {
            Some(dir) => MockStore::with_dir(dir),
            None => MockStore::bundled(),
        };
        Ok(Self {
            fetcher: HttpFetcher::new(config)?,
            mocks,
            cache: Mutex::new(RecordCache::new()),
            cancel: CancellationToken::new(),
        })
    }

    /// Returns a handle to this resolver's cancellation token. Cancelling it
    /// abandons in-flight fetches; see [`Source::Cancelled`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Resolves `resource` to a normalized record array.
    ///
    /// Never returns an error: every failure tier degrades into the next,
    /// and the final [`Resolution`] explains what happened via `source` and
    /// `notice`.
    pub async fn resolve(&self, resource: Resource) -> Resolution {
        if let Some(records) = self.cached(resource) {
            debug!(resource = %resource, "cache hit");
            return Resolution {
                records,
                source: Source::Cache,
                notice: None,
            };
        }

        match self.fetch(resource).await {
            Ok(Fetched {
                payload,
                via_alternate,
            }) => {
                let records = extract_records(payload, resource.wrapper_keys());
                self.cache.lock().insert(resource, records.clone());
                Resolution {
                    records,
                    source: if via_alternate {
                        Source::AlternateBase
                    } else {
                        Source::Primary
                    },
                    notice: None,
                }
            }
            Err(FetchError::Cancelled) => {
                debug!(resource = %resource, "resolution cancelled");
                Resolution {
                    records: Vec::new(),
                    source: Source::Cancelled,
                    notice: None,
                }
            }
            Err(e) => {
                warn!(resource = %resource, error = %e, "all network tiers failed — trying mock payload");
                self.resolve_from_mock(resource, e).await
            }
        }
    }

    /// Races the fetch against the cancellation token.
    async fn fetch(&self, resource: Resource) -> Result<Fetched, FetchError> {
        if self.cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        tokio::select! {
            _ = self.cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.fetcher.get_json(resource.path()) => result,
        }
    }

    /// Last tier: the static mock, or an explained empty result.
    ///
    /// Mock records are intentionally not cached, so a later resolve retries
    /// the network once it recovers.
    async fn resolve_from_mock(&self, resource: Resource, cause: FetchError) -> Resolution {
        match self.mocks.load(resource).await {
            Ok(records) => Resolution {
                records,
                source: Source::Mock,
                notice: Some("Usando dados de exemplo (API falhou)".to_owned()),
            },
            Err(mock_err) => {
                error!(resource = %resource, error = %mock_err, "mock payload unavailable");
                Resolution {
                    records: Vec::new(),
                    source: Source::Exhausted,
                    notice: Some(describe_failure(&cause)),
                }
            }
        }
    }

    fn cached(&self, resource: Resource) -> Option<Vec<Value>> {
        self.cache.lock().get(resource).map(<[Value]>::to_vec)
    }
}

/// Renders the terminal failure into the user-visible error string:
/// status code plus response body when a response was obtained, a generic
/// load-failure message otherwise.
fn describe_failure(error: &FetchError) -> String {
    match error {
        FetchError::RequestFailed { status, body } if body.is_empty() => {
            format!("Erro {status}")
        }
        FetchError::RequestFailed { status, body } => format!("Erro {status} - {body}"),
        _ => "Falha ao carregar dados".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // No server is listening on this port; connections are refused fast.
    fn unreachable_config() -> ApiConfig {
        ApiConfig::new("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn network_failure_degrades_to_mock() {
        let resolver = Resolver::new(&unreachable_config()).unwrap();
        let resolution = resolver.resolve(Resource::Marcas).await;
        assert_eq!(resolution.source, Source::Mock);
        assert!(!resolution.records.is_empty());
        assert_eq!(
            resolution.notice.as_deref(),
            Some("Usando dados de exemplo (API falhou)")
        );
    }

    #[tokio::test]
    async fn mock_results_are_not_cached() {
        let resolver = Resolver::new(&unreachable_config()).unwrap();
        let first = resolver.resolve(Resource::Veiculos).await;
        assert_eq!(first.source, Source::Mock);
        // Still degraded on the second call: nothing was cached.
        let second = resolver.resolve(Resource::Veiculos).await;
        assert_eq!(second.source, Source::Mock);
    }

    #[tokio::test]
    async fn cancelled_resolution_is_empty_and_uncached() {
        let resolver = Resolver::new(&unreachable_config()).unwrap();
        resolver.cancel_token().cancel();

        let resolution = resolver.resolve(Resource::Marcas).await;
        assert_eq!(resolution.source, Source::Cancelled);
        assert!(resolution.records.is_empty());
        assert!(resolution.notice.is_none());
        assert!(resolver.cache.lock().is_empty());
    }

    #[test]
    fn failure_description_includes_status_and_body() {
        let described = describe_failure(&FetchError::RequestFailed {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(described, "Erro 500 - boom");

        let described = describe_failure(&FetchError::RequestFailed {
            status: 404,
            body: String::new(),
        });
        assert_eq!(described, "Erro 404");
    }

    #[test]
    fn degraded_sources() {
        assert!(Source::Mock.is_degraded());
        assert!(Source::Exhausted.is_degraded());
        assert!(Source::Cancelled.is_degraded());
        assert!(!Source::Primary.is_degraded());
        assert!(!Source::AlternateBase.is_degraded());
        assert!(!Source::Cache.is_degraded());
    }
}

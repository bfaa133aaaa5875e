//! API endpoint configuration.
//!
//! The primary base URL resolves in a fixed order: an explicit API URL, else
//! the public base URL, else empty — an empty base means requests stay
//! root-relative and a same-origin rewrite layer outside this crate routes
//! them. The public base additionally feeds the alternate-base fallback in
//! the fetch step.
//!
//! Environment variables:
//!
//! | Variable              | Meaning                                        |
//! |-----------------------|------------------------------------------------|
//! | `VITRINE_API_URL`     | explicit absolute API base URL                 |
//! | `VITRINE_PUBLIC_BASE` | public base URL, also the fallback base        |
//! | `VITRINE_MOCK_DIR`    | directory of `<resource>.json` mock overrides  |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Resolved API endpoint configuration.
///
/// # Examples
///
/// ```
/// use vitrine::config::ApiConfig;
///
/// let config = ApiConfig::new("http://localhost:3001")
///     .with_public_base("https://api.example.com");
/// assert_eq!(config.api_base(), "http://localhost:3001");
/// assert_eq!(config.public_base(), Some("https://api.example.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    api_base: String,
    public_base: Option<String>,
    mock_dir: Option<PathBuf>,
}

impl ApiConfig {
    /// Creates a configuration with an explicit primary base URL.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            public_base: None,
            mock_dir: None,
        }
    }

    /// Creates a same-origin configuration: the primary base is empty and
    /// request paths stay root-relative.
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Reads the configuration from the environment.
    pub fn from_env() -> Self {
        resolve(
            std::env::var("VITRINE_API_URL").ok(),
            std::env::var("VITRINE_PUBLIC_BASE").ok(),
            std::env::var("VITRINE_MOCK_DIR").ok().map(PathBuf::from),
        )
    }

    /// Sets the public base URL used by the alternate-base fallback.
    #[must_use]
    pub fn with_public_base(mut self, public_base: impl Into<String>) -> Self {
        self.public_base = Some(public_base.into());
        self
    }

    /// Points the mock store at a directory of `<resource>.json` files.
    #[must_use]
    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }

    /// Returns the primary base URL; empty means same-origin.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the public base URL, if configured.
    pub fn public_base(&self) -> Option<&str> {
        self.public_base.as_deref()
    }

    /// Returns the mock override directory, if configured.
    pub fn mock_dir(&self) -> Option<&Path> {
        self.mock_dir.as_deref()
    }
}

/// Applies the resolution order: explicit API URL, else public base, else empty.
fn resolve(
    api_url: Option<String>,
    public_base: Option<String>,
    mock_dir: Option<PathBuf>,
) -> ApiConfig {
    let api_base = api_url
        .or_else(|| public_base.clone())
        .unwrap_or_default();
    ApiConfig {
        api_base,
        public_base,
        mock_dir,
    }
}

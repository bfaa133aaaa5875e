//! Static mock payloads — the last tier of the fallback chain.
//!
//! Each resource ships with a bundled JSON payload compiled into the
//! library, so the pipeline can always produce *something* renderable even
//! with no network at all. A [`MockStore`] can additionally be pointed at a
//! directory of `<resource>.json` files, which take precedence over the
//! bundled data (useful for development against realistic fixtures).
//!
//! Mock payloads are expected to be plain JSON arrays; any other shape is
//! coerced to an empty record list.

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::resource::Resource;

/// Error produced when a mock payload is not valid JSON.
///
/// This is the only failure a mock load can surface: an unreadable override
/// file logs a warning and falls back to the bundled payload, and every
/// resource ships with one.
#[derive(Debug, Error)]
#[error("mock payload for {resource} is not valid JSON: {source}")]
pub struct MockError {
    resource: Resource,
    #[source]
    source: serde_json::Error,
}

/// Loader for static mock record payloads.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    dir: Option<PathBuf>,
}

impl MockStore {
    /// Creates a store serving only the bundled payloads.
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Creates a store that reads `<resource>.json` from `dir`, falling back
    /// to the bundled payload when the file is missing or unreadable.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Loads the mock records for `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`MockError`] if the payload is not valid JSON. An unreadable
    /// override file is logged and falls back to the bundled payload rather
    /// than failing.
    pub async fn load(&self, resource: Resource) -> Result<Vec<Value>, MockError> {
        let raw = match self.read_override(resource).await {
            Some(contents) => contents,
            None => bundled_payload(resource).to_owned(),
        };

        let payload: Value =
            serde_json::from_str(&raw).map_err(|source| MockError { resource, source })?;

        // Mocks are contractually plain arrays; coerce anything else to [].
        match payload {
            Value::Array(records) => {
                debug!(resource = %resource, count = records.len(), "loaded mock records");
                Ok(records)
            }
            _ => {
                warn!(resource = %resource, "mock payload is not an array");
                Ok(Vec::new())
            }
        }
    }

    async fn read_override(&self, resource: Resource) -> Option<String> {
        let dir = self.dir.as_ref()?;
        let path = dir.join(resource.mock_file());
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Some(contents),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "mock override unreadable — using bundled payload");
                None
            }
        }
    }
}

/// Returns the bundled JSON payload for `resource`.
fn bundled_payload(resource: Resource) -> &'static str {
    match resource {
        Resource::Marcas => include_str!("marcas.json"),
        Resource::Veiculos => include_str!("veiculos.json"),
    }
}

//! Logical resource identifiers for the catalog API.
//!
//! A [`Resource`] names one remote collection. Its string key doubles as the
//! cache key and as the final path segment of the request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A logical catalog resource.
///
/// # Examples
///
/// ```
/// use vitrine::resource::Resource;
///
/// let r: Resource = "marcas".parse().unwrap();
/// assert_eq!(r, Resource::Marcas);
/// assert_eq!(r.path(), "/api/marcas");
/// assert_eq!(r.wrapper_keys(), &["marcas"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Vehicle brands.
    Marcas,
    /// Vehicles.
    Veiculos,
}

impl Resource {
    /// All known resources, in the order the catalog loads them.
    pub const ALL: [Resource; 2] = [Resource::Marcas, Resource::Veiculos];

    /// Returns the opaque string key. Used as the cache key and in paths.
    pub fn key(self) -> &'static str {
        match self {
            Self::Marcas => "marcas",
            Self::Veiculos => "veiculos",
        }
    }

    /// Returns the root-relative request path for this resource.
    pub fn path(self) -> &'static str {
        match self {
            Self::Marcas => "/api/marcas",
            Self::Veiculos => "/api/veiculos",
        }
    }

    /// Resource-specific wrapper keys tried during shape normalization,
    /// after the generic candidate keys.
    pub fn wrapper_keys(self) -> &'static [&'static str] {
        match self {
            Self::Marcas => &["marcas"],
            Self::Veiculos => &["veiculos"],
        }
    }

    /// File name of the static mock payload for this resource.
    pub fn mock_file(self) -> &'static str {
        match self {
            Self::Marcas => "marcas.json",
            Self::Veiculos => "veiculos.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "marcas" => Ok(Self::Marcas),
            "veiculos" => Ok(Self::Veiculos),
            other => Err(UnknownResource(other.to_owned())),
        }
    }
}

impl AsRef<str> for Resource {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

/// Error returned when parsing an unrecognized resource key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource key: {0:?}")]
pub struct UnknownResource(pub String);

//! # vitrine
//!
//! A fault-tolerant fetch-normalize-fallback pipeline for vehicle catalog
//! APIs, written in Rust.
//!
//! Given a logical resource name (`marcas` = brands, `veiculos` =
//! vehicles), the pipeline produces a normalized record array by trying, in
//! order: the per-session cache, the primary endpoint, an alternate public
//! base URL, and finally a bundled static mock payload. No failure escapes
//! the pipeline as an error — callers always receive a renderable
//! (possibly empty) array plus a notice describing any degradation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vitrine::catalog::Catalog;
//! use vitrine::config::ApiConfig;
//! use vitrine::pipeline::Resolver;
//! use vitrine::page;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = Resolver::new(&ApiConfig::from_env())?;
//!     let catalog = Catalog::load(&resolver).await;
//!
//!     if let Some(notice) = &catalog.notice {
//!         eprintln!("aviso: {notice}");
//!     }
//!     for vehicle in page::slice(&catalog.vehicles, 1, 8) {
//!         println!("{} - {}", vehicle.model_label(), vehicle.brand_label());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod mock;
pub mod normalize;
pub mod page;
pub mod pipeline;
pub mod resource;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use catalog::{Brand, Catalog, Vehicle};
pub use client::FetchError;
pub use config::ApiConfig;
pub use pipeline::{Resolution, Resolver, Source};
pub use resource::Resource;

//! Typed record views and the combined catalog load.
//!
//! Pipeline records are loosely-shaped JSON; this module gives them a typed
//! surface. Every field is optional and every display accessor has a
//! documented fallback precedence, so an incomplete record still renders.
//!
//! [`Catalog::load`] is the page-load operation: both resources resolved
//! concurrently, records typed, degradation notices carried through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::pipeline::{Resolver, Source};
use crate::resource::Resource;

/// Placeholder shown when a brand record carries no usable name.
pub const UNNAMED_BRAND: &str = "(sem nome)";
/// Placeholder shown when a vehicle record carries no usable model.
pub const UNNAMED_MODEL: &str = "(sem modelo)";
/// Placeholder shown when a vehicle record carries no usable brand.
pub const UNNAMED_VEHICLE_BRAND: &str = "(sem marca)";

/// A vehicle brand record. All fields optional; see the accessors for
/// fallback precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    /// Primary identifier. Kept as raw JSON: upstreams send numbers and strings.
    pub id: Option<Value>,
    /// Legacy identifier used by some upstreams.
    #[serde(rename = "_id")]
    pub legacy_id: Option<Value>,
    pub nome: Option<String>,
    pub name: Option<String>,
}

impl Brand {
    /// Display name: `nome`, else `name`, else [`UNNAMED_BRAND`].
    pub fn display_name(&self) -> &str {
        self.nome
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(UNNAMED_BRAND)
    }

    /// Stable list key: `id`, else `_id`, else the display name.
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .or(self.legacy_id.as_ref())
            .map(scalar_to_string)
            .unwrap_or_else(|| self.display_name().to_owned())
    }
}

/// A vehicle record. All fields optional; see the accessors for fallback
/// precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub id: Option<Value>,
    #[serde(rename = "_id")]
    pub legacy_id: Option<Value>,
    pub nome: Option<String>,
    pub modelo: Option<String>,
    pub marca: Option<String>,
    #[serde(rename = "marcaNome")]
    pub marca_nome: Option<String>,
    /// Model year. Raw JSON: upstreams send both `2020` and `"2020"`.
    pub ano: Option<Value>,
    pub placa: Option<String>,
    pub chassi: Option<String>,
}

impl Vehicle {
    /// Model label: `modelo`, else `nome`, else [`UNNAMED_MODEL`].
    pub fn model_label(&self) -> &str {
        self.modelo
            .as_deref()
            .or(self.nome.as_deref())
            .unwrap_or(UNNAMED_MODEL)
    }

    /// Brand label: `marca`, else `marcaNome`, else [`UNNAMED_VEHICLE_BRAND`].
    pub fn brand_label(&self) -> &str {
        self.marca
            .as_deref()
            .or(self.marca_nome.as_deref())
            .unwrap_or(UNNAMED_VEHICLE_BRAND)
    }

    /// Model year rendered as text, if present.
    pub fn year(&self) -> Option<String> {
        self.ano.as_ref().map(scalar_to_string)
    }

    /// Stable list key: `id`, else `_id`, else brand-model-plate (plate
    /// falling back to chassis).
    pub fn key(&self) -> String {
        if let Some(id) = self.id.as_ref().or(self.legacy_id.as_ref()) {
            return scalar_to_string(id);
        }
        let tail = self
            .placa
            .as_deref()
            .or(self.chassi.as_deref())
            .unwrap_or("");
        format!("{}-{}-{}", self.brand_label(), self.model_label(), tail)
    }
}

/// Renders a scalar JSON value without the quotes `Value::to_string` would
/// add around strings.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The loaded catalog: both typed collections plus load provenance.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub brands: Vec<Brand>,
    pub vehicles: Vec<Vehicle>,
    /// First degradation notice from either resolution, if any.
    pub notice: Option<String>,
    pub brand_source: Source,
    pub vehicle_source: Source,
}

impl Catalog {
    /// Resolves brands and vehicles concurrently and types the results.
    ///
    /// Each resource degrades through its own fallback chain, so one dead
    /// endpoint does not blank the other collection. Records that fail
    /// typed deserialization are skipped with a warning rather than
    /// aborting the load.
    pub async fn load(resolver: &Resolver) -> Self {
        let (marcas, veiculos) = tokio::join!(
            resolver.resolve(Resource::Marcas),
            resolver.resolve(Resource::Veiculos),
        );

        Self {
            brands: typed_records(Resource::Marcas, marcas.records),
            vehicles: typed_records(Resource::Veiculos, veiculos.records),
            notice: marcas.notice.or(veiculos.notice),
            brand_source: marcas.source,
            vehicle_source: veiculos.source,
        }
    }
}

/// Deserializes each raw record into `T`, skipping records that do not fit.
fn typed_records<T: serde::de::DeserializeOwned>(
    resource: Resource,
    records: Vec<Value>,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(resource = %resource, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn brand_name_precedence() {
        let both: Brand = serde_json::from_value(json!({ "nome": "Fiat", "name": "FIAT SA" })).unwrap();
        assert_eq!(both.display_name(), "Fiat");

        let name_only: Brand = serde_json::from_value(json!({ "name": "Honda" })).unwrap();
        assert_eq!(name_only.display_name(), "Honda");

        let neither = Brand::default();
        assert_eq!(neither.display_name(), UNNAMED_BRAND);
    }

    #[test]
    fn brand_key_precedence() {
        let with_id: Brand = serde_json::from_value(json!({ "id": 7, "_id": "x" })).unwrap();
        assert_eq!(with_id.key(), "7");

        let legacy: Brand = serde_json::from_value(json!({ "_id": "abc123" })).unwrap();
        assert_eq!(legacy.key(), "abc123");

        let nameless = Brand::default();
        assert_eq!(nameless.key(), UNNAMED_BRAND);
    }

    #[test]
    fn vehicle_label_precedence() {
        let v: Vehicle = serde_json::from_value(json!({
            "nome": "Uno Mille",
            "marcaNome": "Fiat",
        }))
        .unwrap();
        assert_eq!(v.model_label(), "Uno Mille");
        assert_eq!(v.brand_label(), "Fiat");

        let empty = Vehicle::default();
        assert_eq!(empty.model_label(), UNNAMED_MODEL);
        assert_eq!(empty.brand_label(), UNNAMED_VEHICLE_BRAND);
    }

    #[test]
    fn vehicle_year_from_number_or_string() {
        let n: Vehicle = serde_json::from_value(json!({ "ano": 2020 })).unwrap();
        assert_eq!(n.year().as_deref(), Some("2020"));

        let s: Vehicle = serde_json::from_value(json!({ "ano": "2021" })).unwrap();
        assert_eq!(s.year().as_deref(), Some("2021"));

        assert_eq!(Vehicle::default().year(), None);
    }

    #[test]
    fn vehicle_key_without_id_uses_plate_then_chassis() {
        let with_plate: Vehicle = serde_json::from_value(json!({
            "marca": "Fiat", "modelo": "Uno", "placa": "ABC1D23", "chassi": "X",
        }))
        .unwrap();
        assert_eq!(with_plate.key(), "Fiat-Uno-ABC1D23");

        let with_chassi: Vehicle = serde_json::from_value(json!({
            "marca": "Fiat", "modelo": "Uno", "chassi": "9BW004251",
        }))
        .unwrap();
        assert_eq!(with_chassi.key(), "Fiat-Uno-9BW004251");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let v: Vehicle = serde_json::from_value(json!({
            "modelo": "Onix",
            "cor": "prata",
            "portas": 4,
        }))
        .unwrap();
        assert_eq!(v.model_label(), "Onix");
    }

    #[test]
    fn malformed_records_are_skipped() {
        let records = vec![
            json!({ "nome": "Fiat" }),
            json!({ "nome": 123 }), // nome must be a string
            json!({ "name": "Honda" }),
        ];
        let brands: Vec<Brand> = typed_records(Resource::Marcas, records);
        assert_eq!(brands.len(), 2);
        assert_eq!(brands[0].display_name(), "Fiat");
        assert_eq!(brands[1].display_name(), "Honda");
    }
}

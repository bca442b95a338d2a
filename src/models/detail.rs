//! Detail Normalization
//!
//! The detail endpoints answer in one of two shapes for the same logical
//! entity:
//!
//! ```json
//! { "customer": { "customer_id": 1, ... }, "total_spent": 10.0, ... }   // nested
//! { "customer_id": 1, ..., "total_spent": 10.0, ... }                   // flat
//! ```
//!
//! [`DetailShape`] classifies a payload once; [`DetailShape::normalize`] turns
//! either shape into the single canonical [`Detail`]. Nothing outside this
//! module branches on the shape.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{Customer, CustomerMetrics, Product, ProductMetrics};

/// An entity that can arrive nested under a key or flattened at top level
pub trait DetailEntity: DeserializeOwned {
    /// Key the entity sits under in the nested shape
    const NESTED_KEY: &'static str;
    /// Identifying fields of the flat shape, canonical name first
    const ID_FIELDS: &'static [&'static str];
    /// Human-readable entity name for messages
    const LABEL: &'static str;
}

impl DetailEntity for Customer {
    const NESTED_KEY: &'static str = "customer";
    const ID_FIELDS: &'static [&'static str] = &["customer_id", "id"];
    const LABEL: &'static str = "Customer";
}

impl DetailEntity for Product {
    const NESTED_KEY: &'static str = "product";
    const ID_FIELDS: &'static [&'static str] = &["product_id", "id"];
    const LABEL: &'static str = "Product";
}

/// Canonical detail: the entity plus its derived metrics
#[derive(Debug, Clone, PartialEq)]
pub struct Detail<E, M> {
    pub entity: E,
    pub metrics: M,
}

pub type CustomerDetail = Detail<Customer, CustomerMetrics>;
pub type ProductDetail = Detail<Product, ProductMetrics>;

/// The two accepted response shapes
#[derive(Debug, Clone, PartialEq)]
pub enum DetailShape {
    /// Entity under its key, metrics beside it
    Nested { entity: Value, metrics: Map<String, Value> },
    /// Entity fields and metrics side by side
    Flat(Map<String, Value>),
}

/// A detail payload that fits neither shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("{entity} data not available in expected format")]
    Unrecognized { entity: &'static str },

    #[error("{entity} data not available in expected format: expected an object, found {found}")]
    NotAnObject {
        entity: &'static str,
        found: &'static str,
    },

    #[error("{entity} data has an invalid field: {message}")]
    InvalidField {
        entity: &'static str,
        message: String,
    },
}

impl DetailShape {
    /// Classify a decoded body.
    ///
    /// `null` means the API had nothing to say about the entity and yields
    /// `Ok(None)`. A nested key holding a non-object is ignored, so a payload
    /// like `{"customer": null, "customer_id": 4}` still counts as flat.
    pub fn classify<E: DetailEntity>(value: Value) -> Result<Option<Self>, ShapeError> {
        let mut map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => {
                return Err(ShapeError::NotAnObject {
                    entity: E::LABEL,
                    found: json_kind(&other),
                })
            }
        };

        if let Some(entity @ Value::Object(_)) = map.remove(E::NESTED_KEY) {
            return Ok(Some(DetailShape::Nested { entity, metrics: map }));
        }

        let identified = E::ID_FIELDS
            .iter()
            .any(|field| map.get(*field).is_some_and(|v| !v.is_null()));

        if identified {
            Ok(Some(DetailShape::Flat(map)))
        } else {
            Err(ShapeError::Unrecognized { entity: E::LABEL })
        }
    }

    /// Produce the canonical detail from either shape
    pub fn normalize<E, M>(self) -> Result<Detail<E, M>, ShapeError>
    where
        E: DetailEntity,
        M: DeserializeOwned,
    {
        let (entity, metrics) = match self {
            DetailShape::Nested { entity, metrics } => (entity, Value::Object(metrics)),
            DetailShape::Flat(mut map) => {
                // The canonical id and its aliases would collide during
                // deserialization; keep whichever one carries a value.
                let canonical = E::ID_FIELDS[0];
                if map.get(canonical).is_some_and(|v| !v.is_null()) {
                    for alias in &E::ID_FIELDS[1..] {
                        map.remove(*alias);
                    }
                } else {
                    map.remove(canonical);
                }
                let value = Value::Object(map);
                (value.clone(), value)
            }
        };

        let invalid = |e: serde_json::Error| ShapeError::InvalidField {
            entity: E::LABEL,
            message: e.to_string(),
        };

        Ok(Detail {
            entity: serde_json::from_value(entity).map_err(invalid)?,
            metrics: serde_json::from_value(metrics).map_err(invalid)?,
        })
    }
}

/// Classify and normalize in one step
pub fn normalize_detail<E, M>(value: Value) -> Result<Option<Detail<E, M>>, ShapeError>
where
    E: DetailEntity,
    M: DeserializeOwned,
{
    DetailShape::classify::<E>(value)?
        .map(DetailShape::normalize)
        .transpose()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_customer() -> Value {
        json!({
            "customer": {
                "customer_id": 1,
                "customer_name": "Acme",
                "industry": "Tech",
                "region": "West",
                "join_date": "2021-04-01"
            },
            "total_spent": 1520.5,
            "total_transactions": 4,
            "open_tickets": 1,
            "avg_sentiment": 0.42,
            "favorite_category": "Electronics"
        })
    }

    fn flat_customer() -> Value {
        json!({
            "customer_id": 1,
            "customer_name": "Acme",
            "industry": "Tech",
            "region": "West",
            "join_date": "2021-04-01",
            "total_spent": 1520.5,
            "total_transactions": 4,
            "open_tickets": 1,
            "avg_sentiment": 0.42,
            "favorite_category": "Electronics"
        })
    }

    #[test]
    fn test_nested_and_flat_normalize_identically() {
        let nested: CustomerDetail = normalize_detail(nested_customer()).unwrap().unwrap();
        let flat: CustomerDetail = normalize_detail(flat_customer()).unwrap().unwrap();

        assert_eq!(nested, flat);
        assert_eq!(nested.entity.customer_name, "Acme");
        assert_eq!(nested.metrics.total_transactions, 4);
        assert_eq!(nested.metrics.favorite_category.as_deref(), Some("Electronics"));
    }

    #[test]
    fn test_classify_picks_shape() {
        assert!(matches!(
            DetailShape::classify::<Customer>(nested_customer()),
            Ok(Some(DetailShape::Nested { .. }))
        ));
        assert!(matches!(
            DetailShape::classify::<Customer>(flat_customer()),
            Ok(Some(DetailShape::Flat(_)))
        ));
    }

    #[test]
    fn test_null_body_is_absent() {
        let detail: Option<CustomerDetail> = normalize_detail(Value::Null).unwrap();
        assert!(detail.is_none());
    }

    #[test]
    fn test_unrecognized_shape() {
        let err = normalize_detail::<Customer, CustomerMetrics>(json!({"total_spent": 3.0}))
            .unwrap_err();
        assert_eq!(err, ShapeError::Unrecognized { entity: "Customer" });
        assert_eq!(err.to_string(), "Customer data not available in expected format");
    }

    #[test]
    fn test_non_object_body() {
        let err = normalize_detail::<Product, ProductMetrics>(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ShapeError::NotAnObject { found: "an array", .. }));
    }

    #[test]
    fn test_flat_with_id_alias() {
        let detail: ProductDetail = normalize_detail(json!({
            "id": 9,
            "product_name": "Desk",
            "total_sales": 300.0
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.entity.product_id, 9);
        assert_eq!(detail.metrics.total_sales, 300.0);
        assert!(detail.metrics.common_issues.is_empty());
    }

    #[test]
    fn test_flat_with_both_ids_keeps_canonical() {
        let detail: ProductDetail = normalize_detail(json!({
            "id": 100,
            "product_id": 9,
            "product_name": "Desk"
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.entity.product_id, 9);
    }

    #[test]
    fn test_flat_with_null_canonical_id_uses_alias() {
        let detail: CustomerDetail = normalize_detail(json!({
            "customer_id": null,
            "id": 4,
            "customer_name": "Globex",
            "total_spent": 12.5
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.entity.customer_id, 4);
        assert_eq!(detail.entity.customer_name, "Globex");
        assert_eq!(detail.metrics.total_spent, 12.5);
    }

    #[test]
    fn test_null_nested_key_falls_back_to_flat() {
        let detail: CustomerDetail = normalize_detail(json!({
            "customer": null,
            "customer_id": 4,
            "customer_name": "Globex"
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.entity.customer_id, 4);
    }

    #[test]
    fn test_nested_entity_without_id_is_invalid() {
        let err = normalize_detail::<Customer, CustomerMetrics>(json!({
            "customer": {"customer_name": "Nameless"}
        }))
        .unwrap_err();
        assert!(matches!(err, ShapeError::InvalidField { entity: "Customer", .. }));
    }

    #[test]
    fn test_null_metrics_default() {
        let detail: ProductDetail = normalize_detail(json!({
            "product": {"product_id": 2, "product_name": "Chair", "category": "Furniture"},
            "total_sales": null,
            "total_quantity": null,
            "profit": null,
            "avg_sentiment": null,
            "common_issues": null
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.metrics, ProductMetrics::default());
    }
}

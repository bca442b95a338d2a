//! Data Model
//!
//! Shapes this crate reads from the analytics API. Every entity is owned by
//! the API; nothing here is ever written back.
//!
//! - [`types`]: list rows, aggregates and derived-metric payloads
//! - [`detail`]: dual-shape detail responses and their normalization

pub mod detail;
pub mod types;

pub use detail::{normalize_detail, CustomerDetail, Detail, DetailEntity, DetailShape, ProductDetail, ShapeError};
pub use types::{
    Customer, CustomerMetrics, DashboardStats, MonthlySales, Product, ProductMetrics, ProductSales,
    Recommendation, RegionSales, Transaction,
};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field.
///
/// Aggregates computed with SQL `SUM`/`AVG` come back as `null` for entities
/// without rows; the dashboard shows those as zero.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

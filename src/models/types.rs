//! Entity Types
//!
//! Rows, aggregates and derived metrics as the API returns them. Text fields
//! tolerate being absent or `null` so a sparse record still renders with the
//! usual `N/A` placeholders instead of failing the whole view.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Aggregate payload behind the dashboard screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_customers: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_tickets: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales_by_region: Vec<RegionSales>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_products: Vec<ProductSales>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales_trend: Vec<MonthlySales>,
}

/// Sales total for one region (bar chart)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionSales {
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
}

/// Sales total for one of the top products (pie chart)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
}

/// Sales total for one `YYYY-MM` month (line chart)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    #[serde(default, deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
}

/// Customer record, used both for list rows and the detail entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(alias = "id")]
    pub customer_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub join_date: String,
}

/// Server-computed figures attached to a customer detail response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_spent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_transactions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_tickets: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_sentiment: f64,
    #[serde(default)]
    pub favorite_category: Option<String>,
}

/// One sale line from `/sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sale_amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transaction_date: String,
}

/// Product record, used both for list rows and the detail entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "id")]
    pub product_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sales_price: f64,
}

impl Product {
    /// Markup over cost in percent.
    ///
    /// `None` when either price is zero, which is also how a missing price
    /// deserializes.
    pub fn margin_percent(&self) -> Option<f64> {
        if self.cost_price == 0.0 || self.sales_price == 0.0 {
            return None;
        }
        Some((self.sales_price - self.cost_price) / self.cost_price * 100.0)
    }
}

/// Server-computed figures attached to a product detail response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_quantity: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profit: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_sentiment: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub common_issues: Vec<String>,
}

/// "Frequently bought together" entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
}

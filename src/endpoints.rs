//! API Endpoints
//!
//! The fixed set of GET requests the dashboard issues. Paths are relative to
//! the configured API origin.

use serde_json::Value;
use std::fmt;

/// Row cap for the customers collection
pub const CUSTOMER_LIST_LIMIT: usize = 100;

/// Row cap for the products collection
pub const PRODUCT_LIST_LIMIT: usize = 50;

/// One of the API resources the views read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    DashboardStats,
    Customers { limit: usize },
    Customer(String),
    Sales,
    Products { limit: usize },
    Product(String),
    Recommendations(String),
}

impl Endpoint {
    pub fn customers() -> Self {
        Endpoint::Customers {
            limit: CUSTOMER_LIST_LIMIT,
        }
    }

    pub fn products() -> Self {
        Endpoint::Products {
            limit: PRODUCT_LIST_LIMIT,
        }
    }

    /// Path and query string, identifiers percent-encoded
    pub fn path(&self) -> String {
        match self {
            Endpoint::DashboardStats => "/dashboard/stats".to_string(),
            Endpoint::Customers { limit } => format!("/customers?limit={}", limit),
            Endpoint::Customer(id) => format!("/customers/{}", urlencoding::encode(id)),
            Endpoint::Sales => "/sales".to_string(),
            Endpoint::Products { limit } => format!("/products?limit={}", limit),
            Endpoint::Product(id) => format!("/products/{}", urlencoding::encode(id)),
            Endpoint::Recommendations(id) => {
                format!("/recommendations/{}", urlencoding::encode(id))
            }
        }
    }

    /// Full URL against an API origin (trailing slashes tolerated)
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }

    /// Message shown when this resource answers with a failure status and
    /// no detail of its own
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::DashboardStats => "Failed to load dashboard statistics",
            Endpoint::Customers { .. } => "Failed to fetch customers",
            Endpoint::Customer(_) => "Failed to fetch customer data",
            Endpoint::Sales => "Failed to fetch transactions",
            Endpoint::Products { .. } => "Failed to fetch products",
            Endpoint::Product(_) => "Failed to fetch product data",
            Endpoint::Recommendations(_) => "Failed to fetch recommendations",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path())
    }
}

/// Message from an API error body (`{"detail": "..."}`), if it has one
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

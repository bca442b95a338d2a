//! # contexq
//!
//! Business Insights Dashboard - typed client, view state and presentation
//! logic for an externally-owned analytics API (customers, products, sales,
//! sentiment, recommendations).
//!
//! ## Features
//!
//! - **Five screens**: dashboard, customer list/detail, product list/detail
//! - **Client-side filtering**: name search plus facet equality
//! - **Dual-shape tolerance**: nested and flat detail payloads normalize to one shape
//! - **Cancellable views**: navigating away aborts in-flight fetches
//!
//! ## Modules
//!
//! Always available (also compiled into the `contexq-ui` WebAssembly bundle):
//!
//! - [`models`]: entity shapes and detail normalization
//! - [`filter`]: list search and facets
//! - [`routes`] / [`endpoints`]: client paths and API requests
//! - [`view`]: per-fetch lifecycle and rendering contract
//! - [`format`] / [`charts`]: display text and chart geometry
//!
//! With the default `native` feature:
//!
//! - [`client`]: `reqwest` client for the analytics API
//! - [`views`]: screen loaders, cancellable view tasks and the navigator
//! - [`render`]: terminal rendering for the CLI
//! - [`server`]: static host for the UI bundle
//! - [`config`] / [`logging`]: configuration and tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contexq::client::{ApiClient, DashboardSource};
//! use contexq::filter::{CustomerFacet, CustomerFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:8000", None)?;
//!
//!     let customers = client.customers().await?;
//!     let filter = CustomerFilter::new()
//!         .search("acme")
//!         .with(CustomerFacet::Region, "West");
//!
//!     for customer in filter.apply(&customers) {
//!         println!("{} {}", customer.customer_id, customer.customer_name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod endpoints;
pub mod filter;
pub mod format;
pub mod models;
pub mod routes;
pub mod view;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod render;
#[cfg(feature = "native")]
pub mod server;
#[cfg(feature = "native")]
pub mod views;

// Re-export top-level types for convenience
pub use endpoints::Endpoint;
pub use filter::{
    facet_options, transactions_for_customer, transactions_for_id, CustomerFacet, CustomerFilter, Filterable,
    ListFilter, ProductFacet, ProductFilter,
};
pub use models::{
    Customer, CustomerDetail, CustomerMetrics, DashboardStats, Detail, Product, ProductDetail,
    ProductMetrics, Recommendation, ShapeError, Transaction,
};
pub use routes::{Location, Route};
pub use view::{FetchState, Generation, Render};

#[cfg(feature = "native")]
pub use client::{ApiClient, ClientError, ClientResult, DashboardSource};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use views::{MountedScreen, Navigator, Screen, ViewTask};

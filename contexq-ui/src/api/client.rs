//! HTTP API Client
//!
//! Functions for reading the analytics API from the browser. All of them
//! return display-ready error strings.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

use contexq::endpoints::{error_detail, Endpoint};
use contexq::models::{
    normalize_detail, Customer, CustomerDetail, CustomerMetrics, DashboardStats, Product,
    ProductDetail, ProductMetrics, Recommendation, Transaction,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Local storage key for a per-browser override
const API_URL_KEY: &str = "contexq_api_url";

static API_BASE: OnceLock<String> = OnceLock::new();

/// Settings served by the host next to the bundle
#[derive(Debug, serde::Deserialize)]
struct RuntimeConfig {
    api_url: String,
}

/// Resolve the API origin once: host `/config.json`, then the local storage
/// override, then the compiled default.
pub async fn init() {
    let url = match fetch_runtime_config().await {
        Some(url) => url,
        None => stored_api_base().unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
    };
    // Normalize: remove trailing slash
    let _ = API_BASE.set(url.trim_end_matches('/').to_string());
}

/// The resolved API origin
pub fn api_base() -> &'static str {
    API_BASE.get().map(String::as_str).unwrap_or(DEFAULT_API_BASE)
}

async fn fetch_runtime_config() -> Option<String> {
    let response = Request::get("/config.json").send().await.ok()?;
    if !response.ok() {
        return None;
    }
    let config: RuntimeConfig = response.json().await.ok()?;
    Some(config.api_url).filter(|url| !url.trim().is_empty())
}

fn stored_api_base() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(API_URL_KEY).ok()?
}

/// GET an endpoint and decode the body as untyped JSON.
///
/// Failure statuses read the API's `detail` message, falling back to the
/// endpoint's own message. An empty body reads as `null`.
async fn get_json(endpoint: &Endpoint) -> Result<Value, String> {
    let response = Request::get(&endpoint.url(api_base()))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    let ok = response.ok();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !ok {
        return Err(error_detail(&body).unwrap_or_else(|| endpoint.failure_message().to_string()));
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| format!("Parse error: {}", e))
}

async fn get_as<T: DeserializeOwned>(endpoint: &Endpoint) -> Result<T, String> {
    let value = get_json(endpoint).await?;
    serde_json::from_value(value).map_err(|e| format!("Parse error: {}", e))
}

async fn get_list<T: DeserializeOwned>(endpoint: &Endpoint) -> Result<Vec<T>, String> {
    let rows: Option<Vec<T>> = get_as(endpoint).await?;
    Ok(rows.unwrap_or_default())
}

// ============ API Functions ============

pub async fn fetch_dashboard_stats() -> Result<DashboardStats, String> {
    get_as(&Endpoint::DashboardStats).await
}

pub async fn fetch_customers() -> Result<Vec<Customer>, String> {
    get_list(&Endpoint::customers()).await
}

/// `Ok(None)` when the API answered with no customer
pub async fn fetch_customer(id: &str) -> Result<Option<CustomerDetail>, String> {
    let value = get_json(&Endpoint::Customer(id.to_string())).await?;
    normalize_detail::<Customer, CustomerMetrics>(value).map_err(|e| e.to_string())
}

pub async fn fetch_sales() -> Result<Vec<Transaction>, String> {
    get_list(&Endpoint::Sales).await
}

pub async fn fetch_products() -> Result<Vec<Product>, String> {
    get_list(&Endpoint::products()).await
}

pub async fn fetch_product(id: &str) -> Result<Option<ProductDetail>, String> {
    let value = get_json(&Endpoint::Product(id.to_string())).await?;
    normalize_detail::<Product, ProductMetrics>(value).map_err(|e| e.to_string())
}

pub async fn fetch_recommendations(product_id: &str) -> Result<Vec<Recommendation>, String> {
    get_list(&Endpoint::Recommendations(product_id.to_string())).await
}

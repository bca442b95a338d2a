//! Analytics API Client
//!
//! HTTP client for the read-only analytics API. Every operation is a single
//! GET; there are no retries, no caching and no request deduplication.
//!
//! [`DashboardSource`] is the seam the view loaders depend on, so screens can
//! be driven by [`ApiClient`] in production and by in-memory sources in tests.

pub mod error;

pub use error::{ClientError, ClientResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::endpoints::{error_detail, Endpoint};
use crate::models::{
    normalize_detail, Customer, CustomerDetail, CustomerMetrics, DashboardStats, Product,
    ProductDetail, ProductMetrics, Recommendation, Transaction,
};

/// Everything the screens read
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn dashboard_stats(&self) -> ClientResult<DashboardStats>;

    async fn customers(&self) -> ClientResult<Vec<Customer>>;

    /// `Ok(None)` when the API answered successfully with no entity
    async fn customer(&self, id: &str) -> ClientResult<Option<CustomerDetail>>;

    /// The full, unfiltered sales collection
    async fn sales(&self) -> ClientResult<Vec<Transaction>>;

    async fn products(&self) -> ClientResult<Vec<Product>>;

    async fn product(&self, id: &str) -> ClientResult<Option<ProductDetail>>;

    async fn recommendations(&self, product_id: &str) -> ClientResult<Vec<Recommendation>>;
}

/// `reqwest` client bound to one API origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. Without a timeout a hung request
    /// waits until the caller drops it.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        Self::new(config.base_url(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue the request and decode the body as untyped JSON.
    ///
    /// An empty success body reads as `null`.
    pub async fn fetch(&self, endpoint: &Endpoint) -> ClientResult<Value> {
        let request_id = Uuid::new_v4();
        let url = endpoint.url(&self.base_url);

        tracing::debug!(%request_id, %endpoint, "Sending request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_reqwest)?;

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| endpoint.failure_message().to_string());
            tracing::debug!(%request_id, status = status.as_u16(), %message, "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%request_id, status = status.as_u16(), bytes = body.len(), "Request completed");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn fetch_as<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<T> {
        let value = self.fetch(endpoint).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Collections answered with `null` read as empty
    async fn fetch_list<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ClientResult<Vec<T>> {
        let rows: Option<Vec<T>> = self.fetch_as(endpoint).await?;
        Ok(rows.unwrap_or_default())
    }
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        self.fetch_as(&Endpoint::DashboardStats).await
    }

    async fn customers(&self) -> ClientResult<Vec<Customer>> {
        self.fetch_list(&Endpoint::customers()).await
    }

    async fn customer(&self, id: &str) -> ClientResult<Option<CustomerDetail>> {
        let value = self.fetch(&Endpoint::Customer(id.to_string())).await?;
        Ok(normalize_detail::<Customer, CustomerMetrics>(value)?)
    }

    async fn sales(&self) -> ClientResult<Vec<Transaction>> {
        self.fetch_list(&Endpoint::Sales).await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.fetch_list(&Endpoint::products()).await
    }

    async fn product(&self, id: &str) -> ClientResult<Option<ProductDetail>> {
        let value = self.fetch(&Endpoint::Product(id.to_string())).await?;
        Ok(normalize_detail::<Product, ProductMetrics>(value)?)
    }

    async fn recommendations(&self, product_id: &str) -> ClientResult<Vec<Recommendation>> {
        self.fetch_list(&Endpoint::Recommendations(product_id.to_string()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn stats() -> Json<Value> {
        Json(json!({
            "total_customers": 2,
            "total_sales": 1500.5,
            "open_tickets": 1,
            "sales_by_region": [{"region": "West", "total_sales": 1500.5}],
            "top_products": [{"product_id": 7, "product_name": "Desk", "total_sales": 900.0}],
            "sales_trend": [{"month": "2024-01", "total_sales": null}]
        }))
    }

    async fn customers(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("limit").map(String::as_str) != Some("100") {
            return StatusCode::BAD_REQUEST.into_response();
        }
        Json(json!([
            {"customer_id": 1, "customer_name": "Acme", "industry": "Retail", "region": "West", "join_date": "2023-01-05"},
            {"customer_id": 2, "customer_name": "Globex", "industry": "Energy", "region": "East", "join_date": "2023-02-11"}
        ]))
        .into_response()
    }

    async fn customer(Path(id): Path<String>) -> Response {
        match id.as_str() {
            "1" => Json(json!({
                "customer": {"customer_id": 1, "customer_name": "Acme", "industry": "Retail", "region": "West", "join_date": "2023-01-05"},
                "total_spent": 1200.0,
                "total_transactions": 3,
                "open_tickets": 1,
                "avg_sentiment": 0.4,
                "favorite_category": "Furniture"
            }))
            .into_response(),
            "2" => Json(json!({
                "id": 2,
                "customer_name": "Globex",
                "industry": "Energy",
                "region": "East",
                "join_date": "2023-02-11",
                "total_spent": null,
                "total_transactions": 0
            }))
            .into_response(),
            "3" => Json(Value::Null).into_response(),
            "5" => Json(json!([1, 2])).into_response(),
            "6" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
            "99" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(Value::Null).into_response()
            }
            _ => (
                StatusCode::NOT_FOUND,
                Json(json!({"detail": "Customer not found"})),
            )
                .into_response(),
        }
    }

    async fn sales() -> Json<Value> {
        Json(json!([
            {"transaction_id": 10, "customer_id": 1, "product_id": 7, "quantity": 2, "sale_amount": 400.0, "transaction_date": "2024-01-02"}
        ]))
    }

    async fn products() -> Json<Value> {
        Json(json!(null))
    }

    async fn product(Path(id): Path<String>) -> Response {
        match id.as_str() {
            "7" => Json(json!({
                "product": {"product_id": 7, "product_name": "Desk", "category": "Furniture", "cost_price": 150.0, "sales_price": 200.0},
                "total_sales": 900.0,
                "total_quantity": 5,
                "profit": 250.0,
                "avg_sentiment": null,
                "common_issues": ["wobbly legs"]
            }))
            .into_response(),
            _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
        }
    }

    async fn recommendations(Path(id): Path<String>) -> Response {
        match id.as_str() {
            "7" => Json(json!([{"product_id": 8, "product_name": "Chair", "confidence": 0.82}]))
                .into_response(),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "recommendation engine offline"})),
            )
                .into_response(),
        }
    }

    fn fixture_router() -> Router {
        Router::new()
            .route("/dashboard/stats", get(stats))
            .route("/customers", get(customers))
            .route("/customers/:id", get(customer))
            .route("/sales", get(sales))
            .route("/products", get(products))
            .route("/products/:id", get(product))
            .route("/recommendations/:id", get(recommendations))
    }

    async fn spawn_fixture() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, fixture_router()).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    async fn client() -> ApiClient {
        ApiClient::new(&spawn_fixture().await, None).unwrap()
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000//", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let stats = client().await.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.sales_by_region[0].region, "West");
        assert_eq!(stats.sales_trend[0].total_sales, 0.0);
    }

    #[tokio::test]
    async fn test_collections() {
        let client = client().await;
        assert_eq!(client.customers().await.unwrap().len(), 2);
        assert_eq!(client.sales().await.unwrap()[0].customer_id, 1);
        assert!(client.products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_customer_nested_and_flat_agree_on_shape() {
        let client = client().await;

        let nested = client.customer("1").await.unwrap().unwrap();
        assert_eq!(nested.entity.customer_name, "Acme");
        assert_eq!(nested.metrics.total_transactions, 3);
        assert_eq!(nested.metrics.favorite_category.as_deref(), Some("Furniture"));

        let flat = client.customer("2").await.unwrap().unwrap();
        assert_eq!(flat.entity.customer_id, 2);
        assert_eq!(flat.entity.region, "East");
        assert_eq!(flat.metrics.total_spent, 0.0);
    }

    #[tokio::test]
    async fn test_customer_null_body_is_missing() {
        assert!(client().await.customer("3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_status_failures_use_detail_or_fallback() {
        let client = client().await;

        let err = client.customer("404").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Customer not found");

        let err = client.customer("6").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch customer data");

        let err = client.product("1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch product data");
    }

    #[tokio::test]
    async fn test_unrecognized_shape() {
        let err = client().await.customer("5").await.unwrap_err();
        assert!(matches!(err, ClientError::Shape(_)));
    }

    #[tokio::test]
    async fn test_product_and_recommendations() {
        let client = client().await;

        let detail = client.product("7").await.unwrap().unwrap();
        assert_eq!(detail.entity.cost_price, 150.0);
        assert_eq!(detail.metrics.profit, 250.0);
        assert_eq!(detail.metrics.common_issues, vec!["wobbly legs"]);

        let recs = client.recommendations("7").await.unwrap();
        assert_eq!(recs[0].product_name.as_deref(), Some("Chair"));

        let err = client.recommendations("3").await.unwrap_err();
        assert_eq!(err.to_string(), "recommendation engine offline");
    }

    #[tokio::test]
    async fn test_timeout() {
        let client = ApiClient::new(&spawn_fixture().await, Some(Duration::from_millis(100))).unwrap();
        let err = client.customer("99").await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}", addr), None).unwrap();
        let err = client.customers().await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}

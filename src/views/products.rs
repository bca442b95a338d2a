//! Product screens

use crate::client::DashboardSource;
use crate::filter::{facet_options, ProductFacet, ProductFilter};
use crate::models::{Product, ProductDetail, Recommendation};
use crate::view::FetchState;

/// Filterable product table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsView {
    pub products: FetchState<Vec<Product>>,
    pub filter: ProductFilter,
}

impl ProductsView {
    pub async fn load(source: &dyn DashboardSource, filter: ProductFilter) -> Self {
        let mut view = Self {
            filter,
            ..Default::default()
        };
        view.products.begin();

        let result = source.products().await;
        if let Err(e) = &result {
            tracing::error!("Error fetching products: {}", e);
        }
        view.products.resolve(result);
        view
    }

    pub fn rows(&self) -> Vec<&Product> {
        self.products
            .data()
            .map(|all| self.filter.apply(all))
            .unwrap_or_default()
    }

    /// Category choices, from the unfiltered collection
    pub fn categories(&self) -> Vec<String> {
        self.products
            .data()
            .map(|all| facet_options(all, ProductFacet::Category))
            .unwrap_or_default()
    }
}

/// One product with metrics and "frequently bought together".
///
/// The detail payload gates the screen. Recommendations are fetched
/// alongside it but settle on their own, so the screen renders while they
/// are still loading, and they never fail visibly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetailView {
    pub id: String,
    pub detail: FetchState<ProductDetail>,
    pub recommendations: FetchState<Vec<Recommendation>>,
}

impl ProductDetailView {
    /// Settle the product itself; recommendations are left `Loading`
    pub async fn load(source: &dyn DashboardSource, id: &str) -> Self {
        let mut view = Self {
            id: id.to_string(),
            ..Default::default()
        };
        view.detail.begin();
        view.recommendations.begin();

        let detail = source.product(id).await;
        if let Err(e) = &detail {
            tracing::error!(product_id = %id, "Error fetching product data: {}", e);
        }
        view.detail.finish(detail);
        view
    }
}

/// Recommendations for a product; a failure settles as an empty list
pub async fn load_recommendations(
    source: &dyn DashboardSource,
    product_id: &str,
) -> FetchState<Vec<Recommendation>> {
    FetchState::absorb(source.recommendations(product_id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Render;
    use crate::views::stub::{product, StubSource};
    use std::time::Duration;

    fn source() -> StubSource {
        StubSource {
            products: vec![
                product(7, "Standing Desk", "Furniture"),
                product(8, "Monitor", "Electronics"),
                product(9, "Desk Lamp", "Furniture"),
            ],
            recommendations: Some(vec![Recommendation {
                product_id: 8,
                product_name: Some("Monitor".to_string()),
                confidence: 0.7,
            }]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_rows_and_categories() {
        let filter = ProductFilter::new().search("desk");
        let mut view = ProductsView::load(&source(), filter).await;
        assert_eq!(view.rows().len(), 2);

        view.filter.select(ProductFacet::Category, "Electronics");
        assert!(view.rows().is_empty());
        assert_eq!(view.categories(), vec!["Furniture", "Electronics"]);
    }

    #[tokio::test]
    async fn test_detail_then_recommendations() {
        let source = source();
        let mut view = ProductDetailView::load(&source, "7").await;
        assert_eq!(view.detail.data().unwrap().entity.product_name, "Standing Desk");
        assert!(view.recommendations.is_loading());

        view.recommendations = load_recommendations(&source, "7").await;
        assert_eq!(view.recommendations.data().unwrap()[0].product_id, 8);
    }

    #[tokio::test]
    async fn test_detail_settles_while_recommendations_hang() {
        let source = StubSource {
            hang_secondary: true,
            ..source()
        };
        let view = tokio::time::timeout(
            Duration::from_millis(500),
            ProductDetailView::load(&source, "7"),
        )
        .await
        .expect("product detail waited on recommendations");

        assert!(view.detail.data().is_some());
        assert_eq!(view.recommendations.display(), Render::Spinner);
    }

    #[tokio::test]
    async fn test_recommendation_failure_reads_as_empty() {
        let source = StubSource {
            recommendations: None,
            ..source()
        };
        let recommendations = load_recommendations(&source, "7").await;

        assert_eq!(recommendations, FetchState::Ready(Vec::new()));
        assert_eq!(recommendations.error(), None);
    }

    #[tokio::test]
    async fn test_missing_product() {
        let view = ProductDetailView::load(&source(), "100").await;
        assert_eq!(view.detail.display(), Render::NotFound);
    }
}

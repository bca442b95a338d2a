//! Product Detail Page
//!
//! Product information, sales performance, customer feedback and the
//! "frequently bought together" list. Recommendations load alongside the
//! product; when they fail the list is simply empty.

use leptos::*;
use leptos_router::*;

use contexq::format;
use contexq::models::{ProductDetail as Detail, Recommendation};
use contexq::view::{FetchState, Render};

use crate::api;
use crate::components::{gated, InlineLoading};
use crate::state::FetchSlot;

/// Product detail page component
#[component]
pub fn ProductDetail() -> impl IntoView {
    let params = use_params_map();
    let product_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let detail = FetchSlot::<Detail>::new();
    let recommendations = FetchSlot::<Vec<Recommendation>>::new();

    create_effect(move |_| {
        let id = product_id();

        let product = id.clone();
        detail.run(move || async move {
            let result = api::fetch_product(&product).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching product data: {}", e).into());
            }
            FetchState::from_result(result)
        });

        recommendations.run(move || async move {
            let result = api::fetch_recommendations(&id).await;
            if let Err(e) = &result {
                web_sys::console::warn_1(&format!("Error fetching recommendations: {}", e).into());
            }
            FetchState::absorb(result)
        });
    });

    view! {
        <div class="space-y-6">
            {move || detail.state.with(|state| gated(state, "Product", |detail| {
                view! { <ProductContent detail=detail.clone() recommendations=recommendations /> }
                    .into_view()
            }))}
        </div>
    }
}

#[component]
fn ProductContent(detail: Detail, recommendations: FetchSlot<Vec<Recommendation>>) -> impl IntoView {
    let p = detail.entity;
    let m = detail.metrics;
    let margin = format::margin(p.margin_percent());

    let issues = if m.common_issues.is_empty() {
        view! { <li>"No common issues reported"</li> }.into_view()
    } else {
        m.common_issues
            .into_iter()
            .map(|issue| view! { <li>{issue}</li> })
            .collect_view()
    };

    view! {
        <h1 class="text-3xl font-bold">
            {format::or_fallback(&p.product_name, "Unknown Product").to_string()}
        </h1>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="bg-white rounded-lg shadow p-4 md:col-span-2">
                <h2 class="text-lg font-semibold">"Product Information"</h2>
                <p>"Category: " {format::or_na(&p.category).to_string()}</p>
                <p>"Cost Price: " {format::currency(p.cost_price)}</p>
                <p>"Sales Price: " {format::currency(p.sales_price)}</p>
                <p>"Profit Margin: " {margin}</p>
            </div>
            <div class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold">"Sales Performance"</h2>
                <p>"Total Sales: " {format::currency(m.total_sales)}</p>
                <p>"Total Quantity Sold: " {format::count(m.total_quantity)}</p>
                <p>"Total Profit: " {format::currency(m.profit)}</p>
            </div>
            <div class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold">"Customer Feedback"</h2>
                <p>"Average Sentiment: " {format::score(m.avg_sentiment)}</p>
                <p>"Common Issues:"</p>
                <ul class="list-disc pl-6">{issues}</ul>
            </div>
        </div>

        <div class="bg-white rounded-lg shadow p-4">
            <h2 class="text-lg font-semibold">"Frequently Bought Together"</h2>
            {move || recommendations.state.with(|state| match state.display() {
                Render::Spinner => view! { <InlineLoading /> }.into_view(),
                Render::Error(message) => view! { <p class="text-red-600">{message.to_string()}</p> }.into_view(),
                Render::NotFound => view! { <p>"No recommendations available"</p> }.into_view(),
                Render::Content(recs) if recs.is_empty() => {
                    view! { <p>"No recommendations available"</p> }.into_view()
                }
                Render::Content(recs) => view! {
                    <ul class="list-disc pl-6">
                        {recs
                            .iter()
                            .map(|rec| {
                                let name = rec
                                    .product_name
                                    .clone()
                                    .unwrap_or_else(|| "Unknown Product".to_string());
                                view! {
                                    <li>
                                        <A href=format!("/products/{}", rec.product_id) class="text-blue-600 hover:underline">
                                            {name}
                                        </A>
                                        {format!(" (confidence: {})", format::score(rec.confidence))}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_view(),
            })}
        </div>
    }
}

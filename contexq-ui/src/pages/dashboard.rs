//! Dashboard Page
//!
//! Summary counts plus sales by region, top products and the monthly trend.

use leptos::*;

use contexq::charts::{self, Datum};
use contexq::format;
use contexq::models::DashboardStats;
use contexq::view::FetchState;

use crate::api;
use crate::components::{gated, BarChart, LineChart, PieChart, StatCard};
use crate::state::FetchSlot;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let stats = FetchSlot::<DashboardStats>::new();

    // Fetch on mount
    create_effect(move |_| {
        stats.run(|| async {
            let result = api::fetch_dashboard_stats().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching dashboard stats: {}", e).into());
            }
            FetchState::from_result(result.map(Some))
        });
    });

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Dashboard"</h1>
            {move || stats.state.with(|state| gated(state, "Dashboard", |stats| {
                view! { <DashboardContent stats=stats.clone() /> }.into_view()
            }))}
        </div>
    }
}

#[component]
fn DashboardContent(stats: DashboardStats) -> impl IntoView {
    let (regions, products, trend) = charts::dashboard_series(&stats);
    let regions = Signal::derive(move || regions.clone());
    let products: Signal<Vec<Datum>> = Signal::derive(move || products.clone());
    let trend = Signal::derive(move || trend.clone());

    view! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <StatCard title="Total Customers" value=format::count(stats.total_customers) />
            <StatCard title="Total Sales" value=format::currency(stats.total_sales) />
            <StatCard title="Open Tickets" value=format::count(stats.open_tickets) />
        </div>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <section class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold mb-2">"Sales by Region"</h2>
                <BarChart data=regions />
            </section>
            <section class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold mb-2">"Top Products by Sales"</h2>
                <PieChart data=products />
            </section>
        </div>

        <section class="bg-white rounded-lg shadow p-4">
            <h2 class="text-lg font-semibold mb-2">"Sales Trend (Last 12 Months)"</h2>
            <LineChart data=trend />
        </section>
    }
}

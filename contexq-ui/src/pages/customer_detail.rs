//! Customer Detail Page
//!
//! Customer information, purchase and support summaries, and the customer's
//! first transactions from the full sales collection.

use leptos::*;
use leptos_router::*;

use contexq::filter::{transactions_for_id, RECENT_TRANSACTION_LIMIT};
use contexq::format;
use contexq::models::{CustomerDetail as Detail, Transaction};
use contexq::view::FetchState;

use crate::api;
use crate::components::gated;
use crate::state::FetchSlot;

/// Customer detail page component
#[component]
pub fn CustomerDetail() -> impl IntoView {
    let params = use_params_map();
    let customer_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let detail = FetchSlot::<Detail>::new();

    // Refetch whenever the route id changes
    create_effect(move |_| {
        let id = customer_id();
        detail.run(move || async move {
            let result = api::fetch_customer(&id).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching customer data: {}", e).into());
            }
            FetchState::from_result(result)
        });
    });

    view! {
        <div class="space-y-6">
            // Only the slot is tracked here; the route id is read by the effect
            {move || detail.state.with(|state| gated(state, "Customer", |detail| {
                view! { <CustomerContent detail=detail.clone() /> }.into_view()
            }))}
        </div>
    }
}

#[component]
fn CustomerContent(detail: Detail) -> impl IntoView {
    let c = detail.entity;
    let m = detail.metrics;
    let favorite = m.favorite_category.unwrap_or_default();

    view! {
        <h1 class="text-3xl font-bold">
            {format::or_fallback(&c.customer_name, "Unknown Customer").to_string()}
        </h1>

        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
            <div class="bg-white rounded-lg shadow p-4 md:col-span-2">
                <h2 class="text-lg font-semibold">"Customer Information"</h2>
                <p>"Industry: " {format::or_na(&c.industry).to_string()}</p>
                <p>"Region: " {format::or_na(&c.region).to_string()}</p>
                <p>"Member Since: " {format::or_na(&c.join_date).to_string()}</p>
            </div>
            <div class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold">"Purchase Summary"</h2>
                <p>"Total Spent: " {format::currency(m.total_spent)}</p>
                <p>"Transactions: " {format::count(m.total_transactions)}</p>
                <p>"Favorite Category: " {format::or_na(&favorite).to_string()}</p>
            </div>
            <div class="bg-white rounded-lg shadow p-4">
                <h2 class="text-lg font-semibold">"Support Summary"</h2>
                <p>"Open Tickets: " {format::count(m.open_tickets)}</p>
                <p>"Average Sentiment: " {format::score(m.avg_sentiment)}</p>
            </div>
        </div>

        <h2 class="text-2xl font-semibold">"Recent Transactions"</h2>
        <CustomerTransactions customer_id=c.customer_id />
    }
}

/// Reads all sales and keeps this customer's first rows
#[component]
fn CustomerTransactions(customer_id: i64) -> impl IntoView {
    let transactions = FetchSlot::<Vec<Transaction>>::new();

    create_effect(move |_| {
        transactions.run(move || async move {
            let result = api::fetch_sales()
                .await
                .map(|all| transactions_for_id(&all, customer_id, RECENT_TRANSACTION_LIMIT));
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching transactions: {}", e).into());
            }
            FetchState::from_result(result.map(Some))
        });
    });

    view! {
        {move || transactions.state.with(|state| gated(state, "Transactions", |rows| {
            if rows.is_empty() {
                return view! { <p class="text-gray-500">"No transactions found"</p> }.into_view();
            }
            view! {
                <table class="w-full bg-white rounded-lg shadow">
                    <thead>
                        <tr class="text-left border-b">
                            <th class="p-3">"Date"</th>
                            <th class="p-3">"Product ID"</th>
                            <th class="p-3">"Quantity"</th>
                            <th class="p-3">"Amount"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows
                            .iter()
                            .map(|t| view! {
                                <tr class="border-b">
                                    <td class="p-3">{t.transaction_date.clone()}</td>
                                    <td class="p-3">{t.product_id}</td>
                                    <td class="p-3">{t.quantity}</td>
                                    <td class="p-3">{format::currency(t.sale_amount)}</td>
                                </tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_view()
        }))}
    }
}

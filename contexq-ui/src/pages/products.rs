//! Products Page
//!
//! Product catalog with name search and a category filter.

use leptos::*;
use leptos_router::*;

use contexq::filter::ProductFacet;
use contexq::format;
use contexq::models::Product;
use contexq::view::FetchState;

use crate::api;
use crate::components::gated;
use crate::state::{current_location, FetchSlot};

/// Products page component
#[component]
pub fn Products() -> impl IntoView {
    let products = FetchSlot::<Vec<Product>>::new();
    let filter = create_rw_signal(current_location().product_filter());

    create_effect(move |_| {
        products.run(|| async {
            let result = api::fetch_products().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching products: {}", e).into());
            }
            FetchState::from_result(result.map(Some))
        });
    });

    let categories = create_memo(move |_| {
        products.state.with(|s| {
            s.data()
                .map(|all| contexq::facet_options(all, ProductFacet::Category))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Products"</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                <input
                    type="text"
                    placeholder="Search Products"
                    class="px-4 py-2 rounded border border-slate-300 bg-white"
                    prop:value=move || filter.with(|f| f.search_term().to_string())
                    on:input=move |ev| filter.update(|f| f.set_search(event_target_value(&ev)))
                />
                <select
                    class="px-4 py-2 rounded border border-slate-300 bg-white"
                    on:change=move |ev| {
                        filter.update(|f| f.select(ProductFacet::Category, event_target_value(&ev)))
                    }
                >
                    <option value="">"All Categories"</option>
                    {move || {
                        let selected = filter.with(|f| f.selected(ProductFacet::Category).map(str::to_string));
                        categories
                            .get()
                            .into_iter()
                            .map(|category| {
                                let is_selected = selected.as_deref() == Some(category.as_str());
                                view! { <option value=category.clone() selected=is_selected>{category}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            {move || products.state.with(|state| gated(state, "Products", |all| {
                let rows: Vec<Product> = filter.with(|f| f.apply(all).into_iter().cloned().collect());
                view! { <ProductTable rows=rows /> }.into_view()
            }))}
        </div>
    }
}

#[component]
fn ProductTable(rows: Vec<Product>) -> impl IntoView {
    view! {
        <table class="w-full bg-white rounded-lg shadow">
            <thead>
                <tr class="text-left border-b">
                    <th class="p-3">"ID"</th>
                    <th class="p-3">"Name"</th>
                    <th class="p-3">"Category"</th>
                    <th class="p-3">"Cost Price"</th>
                    <th class="p-3">"Sales Price"</th>
                    <th class="p-3">"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|p| view! {
                        <tr class="border-b hover:bg-slate-50">
                            <td class="p-3">{p.product_id}</td>
                            <td class="p-3">{p.product_name}</td>
                            <td class="p-3">{p.category}</td>
                            <td class="p-3">{format::currency(p.cost_price)}</td>
                            <td class="p-3">{format::currency(p.sales_price)}</td>
                            <td class="p-3">
                                <A href=format!("/products/{}", p.product_id) class="text-blue-600 hover:underline">
                                    "View Details"
                                </A>
                            </td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

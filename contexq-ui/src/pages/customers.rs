//! Customers Page
//!
//! Customer table with name search and industry / region filters. Filtering
//! happens in memory on every keystroke.

use leptos::*;
use leptos_router::*;

use contexq::filter::{CustomerFacet, CustomerFilter};
use contexq::models::Customer;
use contexq::view::FetchState;

use crate::api;
use crate::components::gated;
use crate::state::{current_location, FetchSlot};

/// Customers page component
#[component]
pub fn Customers() -> impl IntoView {
    let customers = FetchSlot::<Vec<Customer>>::new();
    // Seeded from `?search=&industry=&region=`
    let filter = create_rw_signal(current_location().customer_filter());

    create_effect(move |_| {
        customers.run(|| async {
            let result = api::fetch_customers().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching customers: {}", e).into());
            }
            FetchState::from_result(result.map(Some))
        });
    });

    let industries = create_memo(move |_| {
        customers.state.with(|s| {
            s.data()
                .map(|all| contexq::facet_options(all, CustomerFacet::Industry))
                .unwrap_or_default()
        })
    });
    let regions = create_memo(move |_| {
        customers.state.with(|s| {
            s.data()
                .map(|all| contexq::facet_options(all, CustomerFacet::Region))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-3xl font-bold">"Customers"</h1>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <input
                    type="text"
                    placeholder="Search Customers"
                    class="px-4 py-2 rounded border border-slate-300 bg-white"
                    prop:value=move || filter.with(|f| f.search_term().to_string())
                    on:input=move |ev| filter.update(|f| f.set_search(event_target_value(&ev)))
                />
                <FacetSelect filter=filter facet=CustomerFacet::Industry all_label="All Industries" options=industries />
                <FacetSelect filter=filter facet=CustomerFacet::Region all_label="All Regions" options=regions />
            </div>

            {move || customers.state.with(|state| gated(state, "Customers", |all| {
                let rows: Vec<Customer> = filter.with(|f| f.apply(all).into_iter().cloned().collect());
                view! { <CustomerTable rows=rows /> }.into_view()
            }))}
        </div>
    }
}

/// Facet dropdown; the empty option clears the facet
#[component]
fn FacetSelect(
    filter: RwSignal<CustomerFilter>,
    facet: CustomerFacet,
    all_label: &'static str,
    options: Memo<Vec<String>>,
) -> impl IntoView {
    view! {
        <select
            class="px-4 py-2 rounded border border-slate-300 bg-white"
            on:change=move |ev| filter.update(|f| f.select(facet, event_target_value(&ev)))
        >
            <option value="">{all_label}</option>
            {move || {
                let selected = filter.with(|f| f.selected(facet).map(str::to_string));
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let is_selected = selected.as_deref() == Some(option.as_str());
                        view! { <option value=option.clone() selected=is_selected>{option}</option> }
                    })
                    .collect_view()
            }}
        </select>
    }
}

#[component]
fn CustomerTable(rows: Vec<Customer>) -> impl IntoView {
    view! {
        <table class="w-full bg-white rounded-lg shadow">
            <thead>
                <tr class="text-left border-b">
                    <th class="p-3">"ID"</th>
                    <th class="p-3">"Name"</th>
                    <th class="p-3">"Industry"</th>
                    <th class="p-3">"Region"</th>
                    <th class="p-3">"Join Date"</th>
                    <th class="p-3">"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|c| view! {
                        <tr class="border-b hover:bg-slate-50">
                            <td class="p-3">{c.customer_id}</td>
                            <td class="p-3">{c.customer_name}</td>
                            <td class="p-3">{c.industry}</td>
                            <td class="p-3">{c.region}</td>
                            <td class="p-3">{c.join_date}</td>
                            <td class="p-3">
                                <A href=format!("/customers/{}", c.customer_id) class="text-blue-600 hover:underline">
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

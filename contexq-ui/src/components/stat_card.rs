//! Stat Card Component

use leptos::*;

/// Titled figure for the dashboard summary row
#[component]
pub fn StatCard(
    #[prop(into)]
    title: String,
    #[prop(into)]
    value: String,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-lg shadow p-6 text-center">
            <h2 class="text-slate-500 text-lg">{title}</h2>
            <p class="text-3xl font-semibold mt-2">{value}</p>
        </div>
    }
}

//! Navigation Component
//!
//! Header navigation bar with title and links.

use leptos::*;
use leptos_router::*;

use contexq::routes::NAV_LINKS;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="bg-slate-800 shadow">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="text-xl font-bold text-white">
                        "Business Insights Dashboard"
                    </A>

                    <div class="flex items-center space-x-1">
                        {NAV_LINKS
                            .iter()
                            .map(|&(href, label)| view! { <NavLink href=href label=label /> })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            exact={href == "/"}
            class="px-4 py-2 rounded-lg text-slate-200 hover:text-white hover:bg-slate-700 transition-colors"
            active_class="bg-slate-700 text-white"
        >
            {label}
        </A>
    }
}

//! App Root Component
//!
//! Router, navigation bar and the five screens.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::pages::{CustomerDetail, Customers, Dashboard, ProductDetail, Products};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <div class="min-h-screen bg-slate-100 text-slate-900 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/customers" view=Customers />
                        <Route path="/customers/:id" view=CustomerDetail />
                        <Route path="/products" view=Products />
                        <Route path="/products/:id" view=ProductDetail />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    let location = use_location();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-slate-500 mb-6">
                {move || format!("Page not found: {}", location.pathname.get())}
            </p>
            <A href="/" class="px-6 py-3 bg-slate-800 text-white rounded-lg font-medium">
                "Go to Dashboard"
            </A>
        </div>
    }
}

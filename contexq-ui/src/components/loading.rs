//! Loading Component
//!
//! Spinners and the shared loading / error / not-found gate.

use leptos::*;

use contexq::view::{FetchState, Render};

/// Full-section loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[200px]">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-5 h-5" />
    }
}

/// Render a fetch state: spinner, then error text, then "`entity` not
/// found", then `content`
pub fn gated<T>(
    state: &FetchState<T>,
    entity: &'static str,
    content: impl FnOnce(&T) -> View,
) -> View {
    match state.display() {
        Render::Spinner => view! { <Loading /> }.into_view(),
        Render::Error(message) => view! {
            <p class="text-red-600">{message.to_string()}</p>
        }
        .into_view(),
        Render::NotFound => view! {
            <p class="text-red-600">{format!("{} not found", entity)}</p>
        }
        .into_view(),
        Render::Content(data) => content(data),
    }
}

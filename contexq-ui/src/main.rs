//! contexq Dashboard
//!
//! Business Insights Dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Summary cards and sales charts
//! - Customer and product lists with search and facet filters
//! - Customer and product detail screens
//!
//! # Architecture
//!
//! Client-side rendered Leptos application compiled to WebAssembly. Models,
//! detail normalization, filtering and chart geometry come from the `contexq`
//! crate; this crate only fetches and draws.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Resolve the API origin once, then mount
    spawn_local(async {
        api::init().await;
        mount_to_body(|| view! { <app::App /> });
    });
}

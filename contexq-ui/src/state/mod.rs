//! State Management
//!
//! Per-component fetch slots. Screens own their state; nothing is shared
//! between views.

pub mod fetch;

pub use fetch::{current_location, FetchSlot};

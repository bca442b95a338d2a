//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod stat_card;

pub use chart::{BarChart, LineChart, PieChart};
pub use loading::{gated, InlineLoading, Loading};
pub use nav::Nav;
pub use stat_card::StatCard;

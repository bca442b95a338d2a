//! Page Components
//!
//! One component per route.

pub mod customer_detail;
pub mod customers;
pub mod dashboard;
pub mod product_detail;
pub mod products;

pub use customer_detail::CustomerDetail;
pub use customers::Customers;
pub use dashboard::Dashboard;
pub use product_detail::ProductDetail;
pub use products::Products;

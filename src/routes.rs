//! Routes
//!
//! Path-to-screen mapping for the five dashboard screens. The UI router and
//! the CLI both dispatch through [`Route`], so a deep link means the same
//! thing everywhere.

use std::collections::BTreeMap;
use std::fmt;

use crate::filter::{CustomerFacet, CustomerFilter, ProductFacet, ProductFilter};

/// Navigation bar entries, in display order
pub const NAV_LINKS: [(&str, &str); 3] = [
    ("/", "Dashboard"),
    ("/customers", "Customers"),
    ("/products", "Products"),
];

/// A client-visible screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Dashboard,
    /// `/customers`
    Customers,
    /// `/customers/{id}`
    CustomerDetail(String),
    /// `/products`
    Products,
    /// `/products/{id}`
    ProductDetail(String),
    /// Anything else; keeps the requested path
    NotFound(String),
}

impl Route {
    /// Map a path to its screen. Query string and fragment are ignored, a
    /// trailing slash is tolerated and identifiers are percent-decoded.
    pub fn parse(href: &str) -> Self {
        let path = strip_query(href);
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Dashboard,
            ["customers"] => Route::Customers,
            ["customers", id] => Route::CustomerDetail(decode(id)),
            ["products"] => Route::Products,
            ["products", id] => Route::ProductDetail(decode(id)),
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical path for this screen
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::Customers => "/customers".to_string(),
            Route::CustomerDetail(id) => format!("/customers/{}", urlencoding::encode(id)),
            Route::Products => "/products".to_string(),
            Route::ProductDetail(id) => format!("/products/{}", urlencoding::encode(id)),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Customers => "Customers",
            Route::CustomerDetail(_) => "Customer",
            Route::Products => "Products",
            Route::ProductDetail(_) => "Product",
            Route::NotFound(_) => "Page Not Found",
        }
    }

    /// Navigation entry this screen belongs under
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Route::Dashboard => Some("/"),
            Route::Customers | Route::CustomerDetail(_) => Some("/customers"),
            Route::Products | Route::ProductDetail(_) => Some("/products"),
            Route::NotFound(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A route plus its query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn parse(href: &str) -> Self {
        let query = href
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or_default())
            .map(parse_query)
            .unwrap_or_default();

        Self {
            route: Route::parse(href),
            query,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Seed the customers filter from `search`, `industry` and `region`
    pub fn customer_filter(&self) -> CustomerFilter {
        let mut filter = CustomerFilter::new();
        if let Some(term) = self.param("search") {
            filter.set_search(term);
        }
        if let Some(industry) = self.param("industry") {
            filter.select(CustomerFacet::Industry, industry);
        }
        if let Some(region) = self.param("region") {
            filter.select(CustomerFacet::Region, region);
        }
        filter
    }

    /// Seed the products filter from `search` and `category`
    pub fn product_filter(&self) -> ProductFilter {
        let mut filter = ProductFilter::new();
        if let Some(term) = self.param("search") {
            filter.set_search(term);
        }
        if let Some(category) = self.param("category") {
            filter.select(ProductFacet::Category, category);
        }
        filter
    }
}

fn strip_query(href: &str) -> &str {
    href.split(['?', '#']).next().unwrap_or_default()
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn parse_query(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(&key.replace('+', " ")), decode(&value.replace('+', " ")))
        })
        .collect()
}

//! List Filtering
//!
//! Client-side narrowing of the customer and product collections: a
//! case-insensitive substring match on the name plus equality on any selected
//! facets. Facet choices always come from the full collection so they never
//! shrink while filters are applied.
//!
//! Everything here works on whatever the list endpoints returned (at most a
//! few hundred rows). Larger collections would need server-side filtering.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;

use crate::models::{Customer, Product, Transaction};

/// Number of transactions shown on a customer's detail screen
pub const RECENT_TRANSACTION_LIMIT: usize = 10;

/// A row that can be searched by name and narrowed by facets
pub trait Filterable {
    type Facet: Copy + Ord + Debug;

    /// Text matched against the search term
    fn name(&self) -> &str;

    /// Value of a facet field on this row
    fn facet_value(&self, facet: Self::Facet) -> &str;
}

/// Facets offered on the customers screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerFacet {
    Industry,
    Region,
}

/// Facets offered on the products screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductFacet {
    Category,
}

impl Filterable for Customer {
    type Facet = CustomerFacet;

    fn name(&self) -> &str {
        &self.customer_name
    }

    fn facet_value(&self, facet: CustomerFacet) -> &str {
        match facet {
            CustomerFacet::Industry => &self.industry,
            CustomerFacet::Region => &self.region,
        }
    }
}

impl Filterable for Product {
    type Facet = ProductFacet;

    fn name(&self) -> &str {
        &self.product_name
    }

    fn facet_value(&self, facet: ProductFacet) -> &str {
        match facet {
            ProductFacet::Category => &self.category,
        }
    }
}

/// Current search term and facet selections of a list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<F: Ord> {
    search: String,
    selections: BTreeMap<F, String>,
}

pub type CustomerFilter = ListFilter<CustomerFacet>;
pub type ProductFilter = ListFilter<ProductFacet>;

impl<F: Ord> Default for ListFilter<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            selections: BTreeMap::new(),
        }
    }
}

impl<F: Copy + Ord + Debug> ListFilter<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ListFilter::set_search`]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    /// Builder form of [`ListFilter::select`]
    pub fn with(mut self, facet: F, value: impl Into<String>) -> Self {
        self.select(facet, value);
        self
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Select a facet value. An empty value means "all" and clears the facet.
    pub fn select(&mut self, facet: F, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.selections.remove(&facet);
        } else {
            self.selections.insert(facet, value);
        }
    }

    pub fn clear(&mut self, facet: F) {
        self.selections.remove(&facet);
    }

    pub fn selected(&self, facet: F) -> Option<&str> {
        self.selections.get(&facet).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.selections.is_empty()
    }

    /// Whether a row passes the search and every selected facet
    pub fn matches<T: Filterable<Facet = F>>(&self, row: &T) -> bool {
        let matches_search = self.search.is_empty()
            || row.name().to_lowercase().contains(&self.search.to_lowercase());

        matches_search
            && self
                .selections
                .iter()
                .all(|(facet, value)| row.facet_value(*facet) == value)
    }

    /// Rows that pass the filter, in their original order
    pub fn apply<'a, T: Filterable<Facet = F>>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }
}

/// Distinct values of a facet across the whole collection, in first-seen order
pub fn facet_options<T: Filterable>(rows: &[T], facet: T::Facet) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| row.facet_value(facet))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Parse a route identifier the way a browser `parseInt` would: optional
/// sign, then leading digits, ignoring anything after them.
pub fn coerce_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// The customer's transactions out of the full sales collection.
///
/// Keeps arrival order and stops after `limit` matches. An identifier that
/// does not coerce to a number matches nothing.
pub fn transactions_for_customer(
    transactions: &[Transaction],
    customer_id: &str,
    limit: usize,
) -> Vec<Transaction> {
    match coerce_id(customer_id) {
        Some(id) => transactions_for_id(transactions, id, limit),
        None => Vec::new(),
    }
}

/// [`transactions_for_customer`] for an id that is already numeric, such
/// as the one on a loaded customer
pub fn transactions_for_id(transactions: &[Transaction], id: i64, limit: usize) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.customer_id == id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: i64, name: &str, industry: &str, region: &str) -> Customer {
        Customer {
            customer_id: id,
            customer_name: name.to_string(),
            industry: industry.to_string(),
            region: region.to_string(),
            join_date: "2022-01-01".to_string(),
        }
    }

    fn sample_customers() -> Vec<Customer> {
        vec![
            customer(1, "Acme", "Tech", "West"),
            customer(2, "Acme Labs", "Tech", "East"),
            customer(3, "Globex", "Retail", "West"),
            customer(4, "Initech", "Finance", "North"),
        ]
    }

    fn sale(id: i64, customer_id: i64) -> Transaction {
        Transaction {
            transaction_id: id,
            customer_id,
            product_id: 1,
            quantity: 1,
            sale_amount: 10.0,
            transaction_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_search_and_region() {
        let customers = vec![
            customer(1, "Acme", "Tech", "West"),
            customer(2, "Acme Labs", "Tech", "East"),
        ];
        let filter = CustomerFilter::new()
            .search("acme")
            .with(CustomerFacet::Region, "West");

        let rows = filter.apply(&customers);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_id, 1);

        let regions = facet_options(&customers, CustomerFacet::Region);
        assert_eq!(regions, vec!["West", "East"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let customers = sample_customers();
        let filter = CustomerFilter::new().search("ACME");
        assert_eq!(filter.apply(&customers).len(), 2);

        let filter = CustomerFilter::new().search("tech");
        assert!(filter.apply(&customers).is_empty(), "search only looks at the name");
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let customers = sample_customers();
        let filter = CustomerFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&customers).len(), customers.len());
    }

    #[test]
    fn test_all_facets_must_match() {
        let customers = sample_customers();
        let filter = CustomerFilter::new()
            .with(CustomerFacet::Industry, "Tech")
            .with(CustomerFacet::Region, "West");

        let ids: Vec<i64> = filter.apply(&customers).iter().map(|c| c.customer_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_empty_selection_clears_facet() {
        let mut filter = CustomerFilter::new().with(CustomerFacet::Industry, "Tech");
        assert_eq!(filter.selected(CustomerFacet::Industry), Some("Tech"));

        filter.select(CustomerFacet::Industry, "");
        assert_eq!(filter.selected(CustomerFacet::Industry), None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_apply_matches_predicate_exactly() {
        let customers = sample_customers();
        let filters = [
            CustomerFilter::new().search("e"),
            CustomerFilter::new().search("x").with(CustomerFacet::Industry, "Retail"),
            CustomerFilter::new().with(CustomerFacet::Region, "South"),
            CustomerFilter::new().search("lab").with(CustomerFacet::Region, "East"),
        ];

        for filter in &filters {
            let shown: Vec<i64> = filter.apply(&customers).iter().map(|c| c.customer_id).collect();
            let expected: Vec<i64> = customers
                .iter()
                .filter(|c| {
                    c.customer_name
                        .to_lowercase()
                        .contains(&filter.search_term().to_lowercase())
                        && filter
                            .selected(CustomerFacet::Industry)
                            .map_or(true, |v| c.industry == v)
                        && filter
                            .selected(CustomerFacet::Region)
                            .map_or(true, |v| c.region == v)
                })
                .map(|c| c.customer_id)
                .collect();
            assert_eq!(shown, expected, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_facet_options_ignore_filters() {
        let customers = sample_customers();
        let before = facet_options(&customers, CustomerFacet::Industry);

        let filter = CustomerFilter::new().with(CustomerFacet::Region, "North");
        let _ = filter.apply(&customers);

        assert_eq!(facet_options(&customers, CustomerFacet::Industry), before);
        assert_eq!(before, vec!["Tech", "Retail", "Finance"]);
    }

    #[test]
    fn test_product_category_filter() {
        let products = vec![
            Product {
                product_id: 1,
                product_name: "Laptop Pro".to_string(),
                category: "Electronics".to_string(),
                cost_price: 900.0,
                sales_price: 1200.0,
            },
            Product {
                product_id: 2,
                product_name: "Desk Lamp".to_string(),
                category: "Home".to_string(),
                cost_price: 12.0,
                sales_price: 25.0,
            },
        ];

        let filter = ProductFilter::new().with(ProductFacet::Category, "Home");
        let rows = filter.apply(&products);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "Desk Lamp");
        assert_eq!(
            facet_options(&products, ProductFacet::Category),
            vec!["Electronics", "Home"]
        );
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id("42"), Some(42));
        assert_eq!(coerce_id(" 7"), Some(7));
        assert_eq!(coerce_id("12abc"), Some(12));
        assert_eq!(coerce_id("-3"), Some(-3));
        assert_eq!(coerce_id("abc"), None);
        assert_eq!(coerce_id(""), None);
    }

    #[test]
    fn test_transactions_capped_and_matching() {
        let mut sales: Vec<Transaction> = (0..30).map(|i| sale(i, i % 2)).collect();
        sales.push(sale(99, 5));

        let rows = transactions_for_customer(&sales, "1", RECENT_TRANSACTION_LIMIT);
        assert_eq!(rows.len(), RECENT_TRANSACTION_LIMIT);
        assert!(rows.iter().all(|t| t.customer_id == 1));
        let ids: Vec<i64> = rows.iter().map(|t| t.transaction_id).collect();
        assert_eq!(ids, vec![1, 3, 5, 7, 9, 11, 13, 15, 17, 19]);

        let rows = transactions_for_customer(&sales, "5", RECENT_TRANSACTION_LIMIT);
        assert_eq!(rows.len(), 1);

        assert!(transactions_for_customer(&sales, "nope", RECENT_TRANSACTION_LIMIT).is_empty());
    }

    #[test]
    fn test_loaded_customer_id_selects_route_rows() {
        let sales: Vec<Transaction> = (0..6).map(|i| sale(i, i % 3)).collect();

        let by_entity = transactions_for_id(&sales, 2, RECENT_TRANSACTION_LIMIT);
        assert_eq!(by_entity, transactions_for_customer(&sales, "02", RECENT_TRANSACTION_LIMIT));
        let ids: Vec<i64> = by_entity.iter().map(|t| t.transaction_id).collect();
        assert_eq!(ids, vec![2, 5]);
    }
}

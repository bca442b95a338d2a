//! Customer screens

use crate::client::DashboardSource;
use crate::filter::{
    facet_options, transactions_for_customer, CustomerFacet, CustomerFilter,
    RECENT_TRANSACTION_LIMIT,
};
use crate::models::{Customer, CustomerDetail, Transaction};
use crate::view::FetchState;

/// Filterable customer table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomersView {
    pub customers: FetchState<Vec<Customer>>,
    pub filter: CustomerFilter,
}

impl CustomersView {
    pub async fn load(source: &dyn DashboardSource, filter: CustomerFilter) -> Self {
        let mut view = Self {
            filter,
            ..Default::default()
        };
        view.customers.begin();

        let result = source.customers().await;
        if let Err(e) = &result {
            tracing::error!("Error fetching customers: {}", e);
        }
        view.customers.resolve(result);
        view
    }

    /// Rows that pass the current filter
    pub fn rows(&self) -> Vec<&Customer> {
        self.customers
            .data()
            .map(|all| self.filter.apply(all))
            .unwrap_or_default()
    }

    /// Industry choices, from the unfiltered collection
    pub fn industries(&self) -> Vec<String> {
        self.options(CustomerFacet::Industry)
    }

    /// Region choices, from the unfiltered collection
    pub fn regions(&self) -> Vec<String> {
        self.options(CustomerFacet::Region)
    }

    fn options(&self, facet: CustomerFacet) -> Vec<String> {
        self.customers
            .data()
            .map(|all| facet_options(all, facet))
            .unwrap_or_default()
    }
}

/// One customer with metrics and recent transactions.
///
/// The transactions sub-view mounts only once the customer itself rendered,
/// and then reads the whole sales collection on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetailView {
    /// Route identifier as given
    pub id: String,
    pub detail: FetchState<CustomerDetail>,
    pub transactions: FetchState<Vec<Transaction>>,
}

impl CustomerDetailView {
    /// Settle the customer. When it is found the transactions section is
    /// left `Loading` for [`load_transactions`] to fill.
    pub async fn load(source: &dyn DashboardSource, id: &str) -> Self {
        let mut view = Self {
            id: id.to_string(),
            ..Default::default()
        };
        view.detail.begin();

        let result = source.customer(id).await;
        if let Err(e) = &result {
            tracing::error!(customer_id = %id, "Error fetching customer data: {}", e);
        }
        view.detail.finish(result);

        if view.detail.data().is_some() {
            view.transactions.begin();
        }
        view
    }
}

/// The customer's first transactions, filtered client-side from `/sales`
pub async fn load_transactions(
    source: &dyn DashboardSource,
    customer_id: &str,
) -> FetchState<Vec<Transaction>> {
    let mut state = FetchState::Loading;
    let result = source.sales().await.map(|all| {
        transactions_for_customer(&all, customer_id, RECENT_TRANSACTION_LIMIT)
    });
    if let Err(e) = &result {
        tracing::error!(%customer_id, "Error fetching transactions: {}", e);
    }
    state.resolve(result);
    state
}

//! Dashboard screen

use crate::charts::{self, Datum};
use crate::client::DashboardSource;
use crate::models::DashboardStats;
use crate::view::FetchState;

/// Summary cards and three charts over one aggregate payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub stats: FetchState<DashboardStats>,
}

impl DashboardView {
    pub async fn load(source: &dyn DashboardSource) -> Self {
        let mut view = Self::default();
        view.stats.begin();

        let result = source.dashboard_stats().await;
        if let Err(e) = &result {
            tracing::error!("Error fetching dashboard stats: {}", e);
        }
        view.stats.resolve(result);
        view
    }

    /// Region bars, top-product pie and monthly trend, once loaded
    pub fn series(&self) -> Option<(Vec<Datum>, Vec<Datum>, Vec<Datum>)> {
        self.stats.data().map(charts::dashboard_series)
    }
}

//! Screen Loaders
//!
//! Each screen is a plain struct of [`FetchState`](crate::view::FetchState)s
//! filled by async loaders. A [`MountedScreen`] runs the loaders inside a
//! [`ViewTask`], which owns a tokio task and aborts it when dropped, so a
//! screen that is navigated away from never writes late results anywhere.
//!
//! A screen renders as soon as its primary fetch settles. Detail screens
//! render again once their secondary section (transactions,
//! recommendations) settles, so a slow secondary never holds back the rest.
//!
//! [`Navigator`] keeps at most one mounted screen and replaces it on every
//! navigation.

pub mod customers;
pub mod dashboard;
pub mod products;

pub use customers::{load_transactions, CustomerDetailView, CustomersView};
pub use dashboard::DashboardView;
pub use products::{load_recommendations, ProductDetailView, ProductsView};

use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::DashboardSource;
use crate::routes::{Location, Route};
use crate::view::FetchState;

/// A loaded screen
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Dashboard(DashboardView),
    Customers(CustomersView),
    CustomerDetail(CustomerDetailView),
    Products(ProductsView),
    ProductDetail(ProductDetailView),
    /// Path that matched no route
    NotFound(String),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard(_) => Route::Dashboard.title(),
            Screen::Customers(_) => Route::Customers.title(),
            Screen::CustomerDetail(_) => Route::CustomerDetail(String::new()).title(),
            Screen::Products(_) => Route::Products.title(),
            Screen::ProductDetail(_) => Route::ProductDetail(String::new()).title(),
            Screen::NotFound(_) => Route::NotFound(String::new()).title(),
        }
    }
}

/// Run the loaders for `location`, sending a render each time a fetch
/// settles. Returns early once nobody is listening.
pub async fn load_screen(
    source: Arc<dyn DashboardSource>,
    location: Location,
    renders: mpsc::UnboundedSender<Screen>,
) {
    let send = |screen: Screen| renders.send(screen).is_ok();

    match location.route {
        Route::Dashboard => {
            send(Screen::Dashboard(DashboardView::load(source.as_ref()).await));
        }
        Route::Customers => {
            let filter = location.customer_filter();
            send(Screen::Customers(CustomersView::load(source.as_ref(), filter).await));
        }
        Route::CustomerDetail(id) => {
            let mut view = CustomerDetailView::load(source.as_ref(), &id).await;
            let child_mounted = matches!(view.transactions, FetchState::Loading);
            if !send(Screen::CustomerDetail(view.clone())) || !child_mounted {
                return;
            }

            view.transactions = load_transactions(source.as_ref(), &id).await;
            send(Screen::CustomerDetail(view));
        }
        Route::Products => {
            let filter = location.product_filter();
            send(Screen::Products(ProductsView::load(source.as_ref(), filter).await));
        }
        Route::ProductDetail(id) => {
            // Issued alongside the product, joined once the product rendered
            let mut recommendations = ViewTask::spawn({
                let source = Arc::clone(&source);
                let id = id.clone();
                async move { load_recommendations(source.as_ref(), &id).await }
            });

            let mut view = ProductDetailView::load(source.as_ref(), &id).await;
            let found = view.detail.data().is_some();
            if !send(Screen::ProductDetail(view.clone())) || !found {
                return;
            }

            if let Some(state) = recommendations.join().await {
                view.recommendations = state;
                send(Screen::ProductDetail(view));
            }
        }
        Route::NotFound(path) => {
            send(Screen::NotFound(path));
        }
    }
}

/// A spawned loader bound to the lifetime of this handle
#[derive(Debug)]
pub struct ViewTask<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ViewTask<T> {
    /// Spawn `future` on the current tokio runtime
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }
}

impl<T> ViewTask<T> {
    /// Wait for the result.
    ///
    /// Cancel-safe: dropping this future leaves the task running and the
    /// result still available. `None` once the result has been taken, or if
    /// the task was aborted or panicked.
    pub async fn join(&mut self) -> Option<T> {
        let handle = self.handle.as_mut()?;
        let result = handle.await;
        self.handle = None;

        match result {
            Ok(value) => Some(value),
            Err(e) if e.is_panic() => {
                tracing::error!("View task panicked: {}", e);
                None
            }
            Err(_) => None,
        }
    }

    pub fn abort(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True while the result has not been taken
    pub fn is_pending(&self) -> bool {
        self.handle.is_some()
    }
}

impl<T> Drop for ViewTask<T> {
    fn drop(&mut self) {
        self.abort();
    }
}

/// One screen's loader and the renders it has produced so far
pub struct MountedScreen {
    location: Location,
    renders: mpsc::UnboundedReceiver<Screen>,
    task: ViewTask<()>,
    finished: bool,
}

impl MountedScreen {
    /// Start loading `location`
    pub fn mount(source: Arc<dyn DashboardSource>, location: Location) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = ViewTask::spawn(load_screen(source, location.clone(), tx));

        Self {
            location,
            renders: rx,
            task,
            finished: false,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Next render, or `None` once the loaders are done and every render
    /// was taken. Cancel-safe.
    pub async fn next_render(&mut self) -> Option<Screen> {
        let screen = self.renders.recv().await;
        if screen.is_none() {
            self.finished = true;
        }
        screen
    }

    /// Wait for every fetch and keep the last render
    pub async fn settled(mut self) -> Option<Screen> {
        let mut last = None;
        while let Some(screen) = self.next_render().await {
            last = Some(screen);
        }
        last
    }

    /// True while more renders may arrive
    pub fn is_loading(&self) -> bool {
        !self.finished && self.task.is_pending()
    }
}

/// One mounted screen at a time
pub struct Navigator {
    source: Arc<dyn DashboardSource>,
    current: Option<MountedScreen>,
}

impl Navigator {
    pub fn new(source: Arc<dyn DashboardSource>) -> Self {
        Self {
            source,
            current: None,
        }
    }

    /// Unmount the current screen (aborting its fetches) and mount `href`
    pub fn navigate(&mut self, href: &str) -> &Location {
        let location = Location::parse(href);

        if let Some(previous) = self.current.as_ref().filter(|s| s.is_loading()) {
            tracing::debug!(from = %previous.location().route, to = %location.route, "Cancelling in-flight view");
        }

        let mounted = MountedScreen::mount(Arc::clone(&self.source), location);
        self.current.insert(mounted).location()
    }

    pub fn location(&self) -> Option<&Location> {
        self.current.as_ref().map(MountedScreen::location)
    }

    /// Next render of the mounted screen. Cancel-safe, so it can sit in a
    /// `tokio::select!` next to an input source.
    pub async fn next_render(&mut self) -> Option<Screen> {
        match self.current.as_mut() {
            Some(mounted) => mounted.next_render().await,
            None => None,
        }
    }

    /// Unmount without mounting anything
    pub fn close(&mut self) {
        self.current = None;
    }
}

//! Fetch Slots
//!
//! A [`FetchSlot`] is a `FetchState` signal plus a [`Generation`]. Every
//! request takes a ticket; a response is written only if its ticket is still
//! current. Starting a new request or unmounting the owning component moves
//! the generation on, so late responses from an old route id or an unmounted
//! screen are dropped instead of written.

use leptos::*;
use std::future::Future;

use contexq::view::{FetchState, Generation};
use contexq::Location;

pub struct FetchSlot<T: 'static> {
    pub state: RwSignal<FetchState<T>>,
    generation: StoredValue<Generation>,
}

impl<T> Clone for FetchSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FetchSlot<T> {}

impl<T: Clone + 'static> FetchSlot<T> {
    /// Create a slot owned by the current component
    pub fn new() -> Self {
        let slot = Self {
            state: create_rw_signal(FetchState::Idle),
            generation: store_value(Generation::default()),
        };
        on_cleanup(move || {
            let _ = slot.generation.try_update_value(|g| g.bump());
        });
        slot
    }

    /// Enter `Loading` and settle with whatever `fetch` resolves to, unless
    /// superseded first
    pub fn run<F, Fut>(&self, fetch: F)
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = FetchState<T>> + 'static,
    {
        let Some(ticket) = self.generation.try_update_value(|g| g.take()) else {
            return;
        };

        self.state.set(FetchState::Loading);

        let slot = *self;
        spawn_local(async move {
            let outcome = fetch().await;
            // A disposed slot has no generation left to match
            if let Some(generation) = slot.generation.try_get_value() {
                if generation.is_current(ticket) {
                    slot.state.try_update(|state| generation.settle(ticket, state, outcome));
                }
            }
        });
    }
}

/// The browser's current path and query as a dashboard location
pub fn current_location() -> Location {
    let href = web_sys::window()
        .map(|w| w.location())
        .map(|l| {
            format!(
                "{}{}",
                l.pathname().unwrap_or_default(),
                l.search().unwrap_or_default()
            )
        })
        .unwrap_or_else(|| "/".to_string());
    Location::parse(&href)
}

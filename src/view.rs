//! View State
//!
//! Per-fetch lifecycle shared by every screen:
//!
//! ```text
//! Idle -> Loading -> Ready(data) | Missing | Failed(message)
//!           ^                                   |
//!           +----- mount / identifier change ---+
//! ```
//!
//! [`FetchState::display`] encodes the rendering contract as a [`Render`]:
//! spinner while loading, then error text, then "not found", then content.

use std::fmt::Display;

/// Lifecycle of one fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet
    Idle,
    /// Request in flight
    Loading,
    /// Response decoded into data
    Ready(T),
    /// Valid response that held no entity
    Missing,
    /// Transport, status or shape failure, as display text
    Failed(String),
}

/// What a view should show for its current fetch state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Render<'a, T> {
    Spinner,
    Error(&'a str),
    NotFound,
    Content(&'a T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    /// Enter `Loading`, discarding any previous outcome
    pub fn begin(&mut self) {
        *self = FetchState::Loading;
    }

    /// Record the outcome of a fetch whose entity may be absent
    pub fn finish<E: Display>(&mut self, result: Result<Option<T>, E>) {
        *self = Self::from_result(result);
    }

    /// Record the outcome of a fetch that always yields data on success
    pub fn resolve<E: Display>(&mut self, result: Result<T, E>) {
        *self = Self::from_result(result.map(Some));
    }

    pub fn from_result<E: Display>(result: Result<Option<T>, E>) -> Self {
        match result {
            Ok(Some(data)) => FetchState::Ready(data),
            Ok(None) => FetchState::Missing,
            Err(e) => FetchState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Idle | FetchState::Loading)
    }

    /// Terminal states stay put until the next trigger
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn display(&self) -> Render<'_, T> {
        match self {
            FetchState::Idle | FetchState::Loading => Render::Spinner,
            FetchState::Failed(message) => Render::Error(message),
            FetchState::Missing => Render::NotFound,
            FetchState::Ready(data) => Render::Content(data),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Ready(data) => FetchState::Ready(f(data)),
            FetchState::Missing => FetchState::Missing,
            FetchState::Failed(message) => FetchState::Failed(message),
        }
    }
}

impl<T: Default> FetchState<T> {
    /// Settle a non-critical fetch: failures become empty data.
    ///
    /// Used for recommendations, where the screen shows its empty-state text
    /// rather than an error.
    pub fn absorb<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => FetchState::Ready(data),
            Err(e) => {
                tracing::warn!(error = %e, "absorbing failed secondary fetch as empty");
                FetchState::Ready(T::default())
            }
        }
    }
}

/// Request tickets for one fetch slot.
///
/// Every request takes a ticket and may write its outcome only while that
/// ticket is current. A newer request, or [`Generation::bump`] when the
/// owner unmounts, supersedes all earlier tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Ticket for a new request
    pub fn take(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current == ticket
    }

    /// Invalidate every outstanding ticket
    pub fn bump(&mut self) {
        self.current += 1;
    }

    /// Write `outcome` into `state` if `ticket` is still current.
    /// Returns whether it was written.
    pub fn settle<T>(&self, ticket: u64, state: &mut FetchState<T>, outcome: FetchState<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        *state = outcome;
        true
    }
}

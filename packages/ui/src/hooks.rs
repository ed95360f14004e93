//! Screen-level async state: loading data and running mutations.
//!
//! [`Loader`] keeps a [`FetchState`] around a [`RequestGate`], so when a screen
//! reloads (or its parameters change) before an earlier fetch resolves, the
//! earlier result is thrown away. [`Action`] tracks a single in-flight mutation and keeps its
//! error for the modal that triggered it.

use std::future::Future;

use dioxus::prelude::*;
use store::StoreError;

use crate::activity_log::{log_activity, log_failure, use_activity_log, ActivityLog, LogLevel};
use crate::request_gate::{RequestGate, Ticket};

/// Progress of a screen's fetches: which one is current, whether it is still
/// running, and what the last one failed with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchState {
    pub loading: bool,
    pub error: Option<String>,
    gate: RequestGate,
}

impl FetchState {
    /// Start a fetch. Clears the previous error so a retry does not show it
    /// next to the spinner.
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.error = None;
        self.gate.begin()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.gate.is_current(ticket)
    }

    /// Apply a finished fetch. Returns the value to show, or `None` when the
    /// fetch failed or a newer one has started since.
    pub fn settle<T>(&mut self, ticket: Ticket, result: Result<T, StoreError>) -> Option<T> {
        if !self.is_current(ticket) {
            return None;
        }
        self.loading = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

pub struct Loader<T: 'static> {
    pub data: Signal<T>,
    state: Signal<FetchState>,
    log: Signal<ActivityLog>,
}

impl<T: 'static> Clone for Loader<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Loader<T> {}

pub fn use_loader<T: Default + 'static>() -> Loader<T> {
    Loader {
        data: use_signal(T::default),
        state: use_signal(FetchState::default),
        log: use_activity_log(),
    }
}

impl<T: 'static> Loader<T> {
    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Fetch and replace `data`, unless a newer load starts first.
    pub fn load<F>(self, what: &'static str, fetch: F)
    where
        F: Future<Output = Result<T, StoreError>> + 'static,
    {
        let Loader {
            mut data,
            mut state,
            mut log,
        } = self;
        let ticket = state.write().begin();
        spawn(async move {
            let result = fetch.await;
            if !state.peek().is_current(ticket) {
                tracing::debug!(what, "discarding stale response");
                return;
            }
            if let Err(e) = &result {
                log_failure(&mut log, &format!("Loading {what}"), e);
            }
            let settled = state.write().settle(ticket, result);
            if let Some(value) = settled {
                data.set(value);
            }
        });
    }
}

/// Treat a missing record as `None` rather than an error.
pub fn found<T>(result: Result<T, StoreError>) -> Result<Option<T>, StoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[derive(Clone, Copy)]
pub struct Action {
    pub busy: Signal<bool>,
    pub error: Signal<Option<String>>,
    log: Signal<ActivityLog>,
}

pub fn use_action() -> Action {
    Action {
        busy: use_signal(|| false),
        error: use_signal(|| None),
        log: use_activity_log(),
    }
}

impl Action {
    pub fn clear(mut self) {
        self.error.set(None);
    }

    /// Run `op`, described as `what` ("Delete unit A101"). On success call
    /// `then`; on failure keep the error. Ignored while another run is in flight.
    pub fn run<F, C>(self, what: String, op: F, then: C)
    where
        F: Future<Output = Result<(), StoreError>> + 'static,
        C: FnOnce() + 'static,
    {
        let Action {
            mut busy,
            mut error,
            mut log,
        } = self;
        if *busy.peek() {
            return;
        }
        busy.set(true);
        error.set(None);
        spawn(async move {
            match op.await {
                Ok(()) => {
                    log_activity(&mut log, LogLevel::Success, &format!("{what}: done"));
                    then();
                }
                Err(e) => {
                    log_failure(&mut log, &format!("{what} failed"), &e);
                    error.set(Some(e.to_string()));
                }
            }
            busy.set(false);
        });
    }

    /// Record a failure that happened before `run` could be called.
    pub fn reject(mut self, e: StoreError) {
        log_activity(&mut self.log, LogLevel::Warning, &e.to_string());
        self.error.set(Some(e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Table;

    #[test]
    fn test_retry_clears_previous_error() {
        let mut state = FetchState::default();
        let first = state.begin();
        let failed: Option<u8> = state.settle(first, Err(StoreError::Transport("down".into())));
        assert_eq!(failed, None);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("network error: down"));

        let retry = state.begin();
        assert!(state.loading);
        assert_eq!(state.error, None);

        assert_eq!(state.settle(retry, Ok(7)), Some(7));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_superseded_fetch_leaves_state_alone() {
        let mut state = FetchState::default();
        let slow = state.begin();
        let fast = state.begin();

        assert_eq!(state.settle(slow, Err::<u8, _>(StoreError::Transport("late".into()))), None);
        assert!(state.loading);
        assert_eq!(state.error, None);

        assert_eq!(state.settle(fast, Ok(1)), Some(1));
        assert!(!state.loading);
    }

    #[test]
    fn test_found_maps_missing_to_none() {
        assert_eq!(found(Ok(3)), Ok(Some(3)));
        assert_eq!(
            found::<u8>(Err(StoreError::NotFound { table: Table::Unit })),
            Ok(None)
        );
        assert!(found::<u8>(Err(StoreError::Transport("down".into()))).is_err());
    }
}

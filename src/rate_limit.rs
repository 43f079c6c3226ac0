//! Debounce and throttle wrappers built on the page's virtual clock.

use std::cell::Cell;
use std::rc::Rc;

use crate::Result;
use crate::page::{Page, TimerId};

struct DebounceState<F> {
    wait_ms: i64,
    pending: Cell<Option<TimerId>>,
    action: F,
}

/// Trailing-edge debounce: only the last trigger of a burst runs, `wait_ms` after it.
pub struct Debounced<F> {
    state: Rc<DebounceState<F>>,
}

impl<F> Clone for Debounced<F> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<F> Debounced<F>
where
    F: Fn(&mut Page) -> Result<()> + 'static,
{
    pub fn new(wait_ms: i64, action: F) -> Self {
        Self {
            state: Rc::new(DebounceState {
                wait_ms,
                pending: Cell::new(None),
                action,
            }),
        }
    }

    pub fn trigger(&self, page: &mut Page) {
        if let Some(previous) = self.state.pending.take() {
            page.clear_timeout(previous);
        }
        let state = Rc::clone(&self.state);
        let id = page.set_timeout(self.state.wait_ms, move |page| {
            state.pending.set(None);
            (state.action)(page)
        });
        self.state.pending.set(Some(id));
    }

    /// Drops a pending call. Returns whether one was pending.
    pub fn cancel(&self, page: &mut Page) -> bool {
        match self.state.pending.take() {
            Some(id) => page.clear_timeout(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        let id = self.state.pending.get();
        id.is_some()
    }
}

struct ThrottleState<F> {
    limit_ms: i64,
    window: Cell<Option<TimerId>>,
    action: F,
}

/// Leading-edge throttle: the first trigger runs at once, later triggers are dropped
/// until `limit_ms` has passed.
pub struct Throttled<F> {
    state: Rc<ThrottleState<F>>,
}

impl<F> Clone for Throttled<F> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<F> Throttled<F>
where
    F: Fn(&mut Page) -> Result<()> + 'static,
{
    pub fn new(limit_ms: i64, action: F) -> Self {
        Self {
            state: Rc::new(ThrottleState {
                limit_ms,
                window: Cell::new(None),
                action,
            }),
        }
    }

    /// Returns whether the action ran.
    pub fn trigger(&self, page: &mut Page) -> Result<bool> {
        if self.is_open() {
            return Ok(false);
        }
        let state = Rc::clone(&self.state);
        let id = page.set_timeout(self.state.limit_ms, move |_| {
            state.window.set(None);
            Ok(())
        });
        self.state.window.set(Some(id));
        (self.state.action)(page)?;
        Ok(true)
    }

    /// Whether a window is open and triggers are currently dropped.
    pub fn is_open(&self) -> bool {
        let id = self.state.window.get();
        id.is_some()
    }
}

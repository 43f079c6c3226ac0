//! Frame-synchronised animation tasks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Result;
use crate::page::{Page, TimerId};

/// Fraction of `duration_ms` covered after `elapsed_ms`, clamped to `[0, 1]`.
pub fn progress(elapsed_ms: i64, duration_ms: i64) -> f64 {
    if duration_ms <= 0 {
        return 1.0;
    }
    (elapsed_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// Quadratic ease-in-out over `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

type StepFn = Box<dyn FnMut(&mut Page, f64) -> Result<()>>;

struct AnimationState {
    duration_ms: i64,
    started_at: Cell<Option<i64>>,
    frame: Cell<Option<TimerId>>,
    running: Cell<bool>,
    step: RefCell<StepFn>,
}

/// An animation driven by `request_animation_frame`.
///
/// The first frame's timestamp is the start time, so the first step always sees progress
/// `0`. Steps run every frame until progress reaches `1`.
pub struct FrameAnimation;

impl FrameAnimation {
    pub fn start<F>(page: &mut Page, duration_ms: i64, step: F) -> AnimationHandle
    where
        F: FnMut(&mut Page, f64) -> Result<()> + 'static,
    {
        let state = Rc::new(AnimationState {
            duration_ms,
            started_at: Cell::new(None),
            frame: Cell::new(None),
            running: Cell::new(true),
            step: RefCell::new(Box::new(step)),
        });
        schedule_frame(page, &state);
        AnimationHandle { state }
    }
}

fn schedule_frame(page: &mut Page, state: &Rc<AnimationState>) {
    let next = Rc::clone(state);
    let id = page.request_animation_frame(move |page, timestamp| run_frame(page, &next, timestamp));
    state.frame.set(Some(id));
}

fn run_frame(page: &mut Page, state: &Rc<AnimationState>, timestamp: i64) -> Result<()> {
    state.frame.set(None);
    if !state.running.get() {
        return Ok(());
    }
    let started_at = match state.started_at.get() {
        Some(started_at) => started_at,
        None => {
            state.started_at.set(Some(timestamp));
            timestamp
        }
    };
    let value = progress(timestamp - started_at, state.duration_ms);

    {
        let mut step = state.step.borrow_mut();
        (*step)(page, value)?;
    }

    // The step may have cancelled us.
    if value < 1.0 && state.running.get() {
        schedule_frame(page, state);
    } else {
        state.running.set(false);
    }
    Ok(())
}

/// Owner of a running [`FrameAnimation`].
#[derive(Clone)]
pub struct AnimationHandle {
    state: Rc<AnimationState>,
}

impl AnimationHandle {
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Stops the animation and clears its scheduled frame.
    pub fn cancel(&self, page: &mut Page) {
        self.state.running.set(false);
        if let Some(frame) = self.state.frame.take() {
            page.cancel_animation_frame(frame);
        }
    }
}

impl std::fmt::Debug for AnimationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationHandle")
            .field("duration_ms", &self.state.duration_ms)
            .field("started_at", &self.state.started_at.get())
            .field("running", &self.state.running.get())
            .finish()
    }
}

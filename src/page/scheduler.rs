use super::Page;
use crate::{Error, Result};

/// Delay between an animation frame request and its callback.
pub(crate) const FRAME_INTERVAL_MS: i64 = 16;

type TaskCallback = Box<dyn FnOnce(&mut Page) -> Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub(crate) struct ScheduledTask {
    id: TimerId,
    due_at: i64,
    order: u64,
    animation_frame: bool,
    callback: TaskCallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: u64,
    pub animation_frame: bool,
}

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Schedules `callback` once, `delay_ms` after the current virtual time.
    pub fn set_timeout<F>(&mut self, delay_ms: i64, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page) -> Result<()> + 'static,
    {
        self.schedule_task(delay_ms, false, Box::new(callback))
    }

    /// Returns whether a pending timeout was removed.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != id);
        let cleared = self.task_queue.len() != before;
        if cleared && self.tracing_active() {
            self.trace_line(format!("[timer] clear id={}", id.0));
        }
        cleared
    }

    /// Schedules `callback` for the next frame. It receives the frame timestamp.
    pub fn request_animation_frame<F>(&mut self, callback: F) -> TimerId
    where
        F: FnOnce(&mut Page, i64) -> Result<()> + 'static,
    {
        self.schedule_task(
            FRAME_INTERVAL_MS,
            true,
            Box::new(move |page: &mut Page| {
                let timestamp = page.now_ms;
                callback(page, timestamp)
            }),
        )
    }

    pub fn cancel_animation_frame(&mut self, id: TimerId) -> bool {
        self.clear_timeout(id)
    }

    fn schedule_task(
        &mut self,
        delay_ms: i64,
        animation_frame: bool,
        callback: TaskCallback,
    ) -> TimerId {
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let delay_ms = delay_ms.max(0);
        let due_at = self.now_ms.saturating_add(delay_ms);
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            animation_frame,
            callback,
        });
        if self.tracing_active() {
            let kind = if animation_frame { "frame" } else { "timeout" };
            self.trace_line(format!(
                "[timer] schedule {kind} id={} due_at={due_at} delay_ms={delay_ms}",
                id.0
            ));
        }
        id
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                animation_frame: task.animation_frame,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.now_ms.saturating_add(delta_ms);
        self.advance_time_to(target)
    }

    /// Moves the clock to `target_ms`, running every task due on the way at its own due
    /// time, so chained timeouts and frames observe the clock they were scheduled for.
    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        let from = self.now_ms;
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.now_ms = target_ms;
        if self.tracing_active() {
            self.trace_line(format!(
                "[timer] advance from={from} to={target_ms} ran_due={ran}"
            ));
        }
        Ok(())
    }

    /// Runs every pending task, jumping the clock forward as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        if self.tracing_active() {
            self.trace_line(format!(
                "[timer] flush from={from} to={} ran={ran}",
                self.now_ms
            ));
        }
        Ok(())
    }

    /// Runs tasks already due without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.now_ms), false)?;
        if self.tracing_active() {
            self.trace_line(format!(
                "[timer] run_due now_ms={} ran={ran}",
                self.now_ms
            ));
        }
        Ok(ran)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.next_task_index(due_limit) {
            steps += 1;
            if steps > self.timer_step_limit {
                return Err(self.timer_step_limit_error(steps, due_limit));
            }
            let task = self.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.now_ms {
                self.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = self
            .next_task_index(due_limit)
            .and_then(|idx| self.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},order={},animation_frame={}",
                    task.id.0, task.due_at, task.order, task.animation_frame
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Runtime(format!(
            "timer queue exceeded max task steps (possible runaway animation): limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            self.timer_step_limit,
            self.now_ms,
            self.task_queue.len(),
        ))
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        if self.tracing_active() {
            let kind = if task.animation_frame { "frame" } else { "timeout" };
            self.trace_line(format!(
                "[timer] run {kind} id={} due_at={} now_ms={}",
                task.id.0, task.due_at, self.now_ms
            ));
        }
        (task.callback)(self)
    }
}

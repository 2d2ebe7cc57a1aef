//! Deferred task queue for multi-step dialogue and timed effects.
//!
//! There is no background execution: a "delayed" effect is a closure stamped
//! with a due tick, run from `Engine::tick`. The queue belongs to one
//! scene-session; a scene change or restart cancels it wholesale and bumps
//! the session stamp, so a task drained in the same tick that then changes
//! the scene invalidates the tasks drained after it.

use crate::engine::Engine;
use log::debug;

pub(crate) type Task = Box<dyn FnOnce(&mut Engine)>;

pub(crate) struct DeferredTask {
    pub due: u64,
    pub session: u64,
    pub task: Task,
}

pub(crate) struct TimerQueue {
    session: u64,
    tasks: Vec<DeferredTask>,
}

impl TimerQueue {
    pub fn new() -> TimerQueue {
        TimerQueue {
            session: 0,
            tasks: Vec::new(),
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn schedule(&mut self, due: u64, task: Task) {
        debug!("deferred task scheduled for tick {}", due);
        self.tasks.push(DeferredTask {
            due,
            session: self.session,
            task,
        });
    }

    /// Drop every pending task and invalidate tasks already drained.
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            debug!("cancelling {} deferred task(s)", self.tasks.len());
        }
        self.tasks.clear();
        self.session += 1;
    }

    /// Remove and return tasks due at `now`, preserving schedule order.
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredTask> {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.due <= now);
        self.tasks = pending;
        due
    }
}

//! Snapshot-based undo/redo for the flow graph.
//!
//! [`HistoryEngine`] keeps a bounded [`HistoryStack`] of [`GraphSnapshot`]s.
//! Pushes go through a [`Debouncer`] so that a burst of edits (a drag fires
//! dozens of position updates) settles into a single history entry.
//! Restoring the canvas is left to a callback supplied by the host.

pub mod debounce;
pub mod scheduler;
pub mod stack;

pub use debounce::Debouncer;
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerId};
pub use stack::HistoryStack;

use crate::config::HistoryConfig;
use crate::graph::GraphSnapshot;
use std::cell::RefCell;
use std::rc::Rc;

pub type RestoreFn = Box<dyn FnMut(&GraphSnapshot)>;

pub struct HistoryEngine {
    stack: Rc<RefCell<HistoryStack<GraphSnapshot>>>,
    debouncer: Debouncer,
    restore: RestoreFn,
}

impl HistoryEngine {
    pub fn new(
        config: &HistoryConfig,
        scheduler: Rc<dyn Scheduler>,
        restore: impl FnMut(&GraphSnapshot) + 'static,
    ) -> Self {
        Self {
            stack: Rc::new(RefCell::new(HistoryStack::new(config.max_depth))),
            debouncer: Debouncer::new(scheduler, config.debounce()),
            restore: Box::new(restore),
        }
    }

    /// Schedules a deep copy of `snapshot` to be recorded once edits settle.
    /// A later call before the delay elapses replaces this one.
    pub fn push_history(&self, snapshot: &GraphSnapshot) {
        let stack = Rc::clone(&self.stack);
        let snapshot = snapshot.clone();
        self.debouncer.call(Box::new(move || {
            let mut stack = stack.borrow_mut();
            stack.push(snapshot);
            tracing::debug!(depth = stack.undo_len(), "history snapshot recorded");
        }));
    }

    /// Records `snapshot` right away, bypassing the debounce.
    pub fn push_now(&self, snapshot: &GraphSnapshot) {
        self.debouncer.flush();
        let mut stack = self.stack.borrow_mut();
        stack.push(snapshot.clone());
        tracing::debug!(depth = stack.undo_len(), "history snapshot recorded");
    }

    /// Drops a pending debounced push. Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        let cancelled = self.debouncer.cancel_pending();
        if cancelled {
            tracing::debug!("pending history snapshot cancelled");
        }
        cancelled
    }

    /// Commits a pending debounced push immediately.
    pub fn flush(&self) -> bool {
        self.debouncer.flush()
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Starts a fresh history whose only entry is `initial`.
    pub fn reset(&self, initial: &GraphSnapshot) {
        self.cancel_pending();
        let mut stack = self.stack.borrow_mut();
        stack.clear();
        stack.push(initial.clone());
    }

    /// Steps back to the previous snapshot and hands it to the restore callback.
    ///
    /// A pending push is committed first so the latest edit can be redone.
    /// Returns `None` when only the initial state remains.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        self.debouncer.flush();
        let state = self.stack.borrow_mut().undo().cloned();
        match &state {
            Some(snapshot) => {
                tracing::debug!(
                    undo = self.undo_depth(),
                    redo = self.redo_depth(),
                    "undo"
                );
                (self.restore)(snapshot);
            }
            None => tracing::trace!("nothing to undo"),
        }
        state
    }

    /// Re-applies the last undone snapshot. Returns `None` if there is none.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        self.debouncer.flush();
        let state = self.stack.borrow_mut().redo().cloned();
        match &state {
            Some(snapshot) => {
                tracing::debug!(
                    undo = self.undo_depth(),
                    redo = self.redo_depth(),
                    "redo"
                );
                (self.restore)(snapshot);
            }
            None => tracing::trace!("nothing to redo"),
        }
        state
    }

    pub fn can_undo(&self) -> bool {
        self.stack.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.stack.borrow().can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.stack.borrow().undo_len()
    }

    pub fn redo_depth(&self) -> usize {
        self.stack.borrow().redo_len()
    }

    /// The snapshot at the top of the undo stack.
    pub fn current(&self) -> Option<GraphSnapshot> {
        self.stack.borrow().current().cloned()
    }

    /// Undo entries from oldest to newest.
    pub fn undo_entries(&self) -> Vec<GraphSnapshot> {
        self.stack.borrow().undo_entries().cloned().collect()
    }
}

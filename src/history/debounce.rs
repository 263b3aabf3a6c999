use super::scheduler::{Scheduler, Task, TimerId};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct Slot {
    timer: Option<TimerId>,
    task: Option<Task>,
}

/// Last-write-wins debounce on top of a [`Scheduler`].
///
/// Each `call` replaces the pending task and restarts the delay, so at most
/// one timer is ever outstanding.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    delay: Duration,
    slot: Rc<RefCell<Slot>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, delay: Duration) -> Self {
        Self {
            scheduler,
            delay,
            slot: Rc::new(RefCell::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call(&self, task: Task) {
        let previous = self.slot.borrow_mut().timer.take();
        if let Some(timer) = previous {
            self.scheduler.cancel(timer);
            tracing::trace!("debounce timer restarted");
        }
        self.slot.borrow_mut().task = Some(task);

        let slot = Rc::clone(&self.slot);
        let timer = self.scheduler.schedule_after(
            self.delay,
            Box::new(move || {
                let task = {
                    let mut slot = slot.borrow_mut();
                    slot.timer = None;
                    slot.task.take()
                };
                if let Some(task) = task {
                    task();
                }
            }),
        );

        let mut slot = self.slot.borrow_mut();
        if slot.task.is_some() {
            slot.timer = Some(timer);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.borrow().task.is_some()
    }

    /// Drops the pending task without running it.
    pub fn cancel_pending(&self) -> bool {
        let (timer, task) = {
            let mut slot = self.slot.borrow_mut();
            (slot.timer.take(), slot.task.take())
        };
        if let Some(timer) = timer {
            self.scheduler.cancel(timer);
        }
        task.is_some()
    }

    /// Runs the pending task now instead of waiting for the delay.
    pub fn flush(&self) -> bool {
        let (timer, task) = {
            let mut slot = self.slot.borrow_mut();
            (slot.timer.take(), slot.task.take())
        };
        if let Some(timer) = timer {
            self.scheduler.cancel(timer);
        }
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

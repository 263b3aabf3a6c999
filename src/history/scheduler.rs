use std::cell::RefCell;
use std::time::Duration;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

pub type Task = Box<dyn FnOnce()>;

/// Delayed single-shot task execution.
///
/// The history engine only needs "run this after `delay`" and "never mind".
/// Hosts implement this on top of their event loop; tests use [`ManualScheduler`].
pub trait Scheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancels a pending task. Returns `false` if it already ran or never existed.
    fn cancel(&self, id: TimerId) -> bool;
}

struct Timer {
    id: TimerId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

/// A scheduler driven by a fake clock. Time only moves on `advance`.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the fake clock since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Moves the clock forward, running every task that falls due in order.
    /// Returns the number of tasks run. Tasks may schedule further tasks.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut ran = 0;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let earliest = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id.0))
                    .map(|(index, _)| index);
                earliest.map(|index| {
                    let timer = state.timers.remove(index);
                    state.now = timer.due;
                    timer.task
                })
            };
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.state.borrow_mut().now = target;
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due = state.now + delay;
        state.timers.push(Timer { id, due, task });
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.timers.len();
        state.timers.retain(|t| t.id != id);
        state.timers.len() != before
    }
}

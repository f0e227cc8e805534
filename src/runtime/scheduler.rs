//! Timer scheduling.
//!
//! The engine never sleeps. Every delay (comparison dwell, intro step) is a
//! task handed to a [`Scheduler`], which runs it later on the same thread.
//!
//! [`ManualScheduler`] is a virtual clock: nothing runs until the owner
//! advances time. It drives headless sessions and every timing test.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Handle for cancelling a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl std::fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Single-threaded timer queue.
///
/// ## Contract
///
/// - `after` must never run `task` before returning, even for a zero delay.
/// - Tasks with equal deadlines run in scheduling order.
/// - Cancelling a handle that already ran (or never existed) is a no-op.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn after(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Drop a task that has not run yet.
    fn cancel(&self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn after(&self, delay: Duration, task: Task) -> TimerHandle {
        (**self).after(delay, task)
    }

    fn cancel(&self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, u64), Task>,
    deadlines: FxHashMap<u64, Duration>,
}

impl Clock {
    fn pop_due(&mut self, limit: Option<Duration>) -> Option<Task> {
        let (&(deadline, id), _) = self.queue.first_key_value()?;
        if limit.is_some_and(|limit| deadline > limit) {
            return None;
        }
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        self.queue.remove(&(deadline, id))
    }
}

/// Virtual-time scheduler.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use memory_match::runtime::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// scheduler.after(Duration::from_millis(400), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(399));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    clock: RefCell<Clock>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled by running tasks also run if their deadline falls
    /// inside the window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut ran = 0;
        loop {
            // The clock borrow must end before the task runs, tasks reschedule.
            let task = self.clock.borrow_mut().pop_due(Some(target));
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
        ran
    }

    /// Run tasks in deadline order until the queue is empty.
    ///
    /// The clock ends at the deadline of the last task run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.clock.borrow_mut().pop_due(None);
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let deadline = clock.now + delay;
        clock.queue.insert((deadline, id), task);
        clock.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut clock = self.clock.borrow_mut();
        if let Some(deadline) = clock.deadlines.remove(&handle.0) {
            clock.queue.remove(&(deadline, handle.0));
        }
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.clock.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.queue.len())
            .finish()
    }
}

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Something that can run a task later. Dropping the returned handle cancels
/// the task if it has not run yet.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Keyed one-shot timers as seen by a controller. Starting a key that is
/// already pending replaces it.
pub trait Timers<K> {
    fn start(&mut self, key: K, delay_ms: u32);
    fn cancel(&mut self, key: K);
}

/// One pending handle per key; expiry is reported through `dispatch`.
pub struct TimerSlots<K, S: Scheduler> {
    scheduler: S,
    dispatch: Rc<dyn Fn(K)>,
    pending: HashMap<K, S::Handle>,
}

impl<K, S> TimerSlots<K, S>
where
    K: Copy + Eq + Hash + 'static,
    S: Scheduler,
{
    pub fn new(scheduler: S, dispatch: impl Fn(K) + 'static) -> Self {
        Self {
            scheduler,
            dispatch: Rc::new(dispatch),
            pending: HashMap::new(),
        }
    }

    /// Drops every pending handle.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

impl<K, S> Timers<K> for TimerSlots<K, S>
where
    K: Copy + Eq + Hash + 'static,
    S: Scheduler,
{
    fn start(&mut self, key: K, delay_ms: u32) {
        let dispatch = Rc::clone(&self.dispatch);
        let handle = self
            .scheduler
            .schedule(delay_ms, Box::new(move || dispatch(key)));
        // The old handle, if any, is dropped here and never fires.
        self.pending.insert(key, handle);
    }

    fn cancel(&mut self, key: K) {
        self.pending.remove(&key);
    }
}

struct DebounceInner<S: Scheduler> {
    scheduler: S,
    quantum_ms: u32,
    handler: Box<dyn Fn()>,
    pending: RefCell<Option<S::Handle>>,
}

/// Trailing-edge debounce: the handler runs once calls have stopped for
/// `quantum_ms`. Each instance owns its own timer.
pub struct Debounced<S: Scheduler> {
    inner: Rc<DebounceInner<S>>,
}

impl<S: Scheduler + 'static> Debounced<S> {
    pub fn new(scheduler: S, quantum_ms: u32, handler: impl Fn() + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                scheduler,
                quantum_ms,
                handler: Box::new(handler),
                pending: RefCell::new(None),
            }),
        }
    }

    pub fn call(&self) {
        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(
            self.inner.quantum_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    (inner.handler)();
                }
            }),
        );
        self.inner.pending.replace(Some(handle));
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Task {
        due: u64,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        run: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Queue {
        now: u64,
        next_seq: u64,
        tasks: Vec<Task>,
    }

    /// Virtual clock. Tasks run only when the test advances time.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        queue: Rc<RefCell<Queue>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut queue = self.queue.borrow_mut();
            let seq = queue.next_seq;
            queue.next_seq += 1;
            let due = queue.now + u64::from(delay_ms);
            queue.tasks.push(Task {
                due,
                seq,
                cancelled: Rc::clone(&cancelled),
                run: task,
            });
            ManualHandle { cancelled }
        }
    }

    impl ManualScheduler {
        pub fn now(&self) -> u64 {
            self.queue.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.queue
                .borrow()
                .tasks
                .iter()
                .filter(|t| !t.cancelled.get())
                .count()
        }

        /// Moves the clock forward, running due tasks in deadline order.
        /// Returns how many ran.
        pub fn advance(&self, ms: u64) -> usize {
            let target = self.now() + ms;
            let mut ran = 0;
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    queue.tasks.retain(|t| !t.cancelled.get());
                    let index = queue
                        .tasks
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.due <= target)
                        .min_by_key(|(_, t)| (t.due, t.seq))
                        .map(|(i, _)| i);
                    index.map(|i| {
                        let task = queue.tasks.remove(i);
                        queue.now = task.due;
                        task
                    })
                };
                match next {
                    Some(task) => {
                        (task.run)();
                        ran += 1;
                    }
                    None => break,
                }
            }
            self.queue.borrow_mut().now = target;
            ran
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn burst_of_calls_runs_once_after_quiet_period() {
        let clock = ManualScheduler::default();
        let (count, handler) = counter();
        let debounced = Debounced::new(clock.clone(), 10, handler);

        for _ in 0..20 {
            debounced.call();
            clock.advance(3);
        }
        assert_eq!(count.get(), 0);

        clock.advance(9);
        assert_eq!(count.get(), 1);
        clock.advance(100);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn separate_bursts_each_fire() {
        let clock = ManualScheduler::default();
        let (count, handler) = counter();
        let debounced = Debounced::new(clock.clone(), 10, handler);

        debounced.call();
        clock.advance(10);
        debounced.call();
        clock.advance(10);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn debouncers_do_not_share_timers() {
        let clock = ManualScheduler::default();
        let (first_count, first) = counter();
        let (second_count, second) = counter();
        let a = Debounced::new(clock.clone(), 10, first);
        let b = Debounced::new(clock.clone(), 10, second);

        a.call();
        clock.advance(6);
        b.call();
        clock.advance(4);
        assert_eq!((first_count.get(), second_count.get()), (1, 0));
        clock.advance(6);
        assert_eq!((first_count.get(), second_count.get()), (1, 1));
    }

    #[test]
    fn dropping_stops_pending_call() {
        let clock = ManualScheduler::default();
        let (count, handler) = counter();
        let debounced = Debounced::new(clock.clone(), 10, handler);

        debounced.call();
        drop(debounced);
        clock.advance(50);
        assert_eq!(count.get(), 0);
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        A,
        B,
    }

    #[test]
    fn restarting_a_slot_replaces_the_stale_timer() {
        let clock = ManualScheduler::default();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&fired);
        let mut slots = TimerSlots::new(clock.clone(), move |key| log.borrow_mut().push(key));

        slots.start(Key::A, 100);
        slots.start(Key::B, 50);
        clock.advance(60);
        slots.start(Key::A, 100);
        clock.advance(60);
        assert_eq!(*fired.borrow(), vec![Key::B]);

        clock.advance(40);
        assert_eq!(*fired.borrow(), vec![Key::B, Key::A]);
        assert_eq!(clock.now(), 160);
    }

    #[test]
    fn cancelled_slots_never_fire() {
        let clock = ManualScheduler::default();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&fired);
        let mut slots = TimerSlots::new(clock.clone(), move |key| log.borrow_mut().push(key));

        slots.start(Key::A, 10);
        slots.start(Key::B, 10);
        slots.cancel(Key::A);
        assert_eq!(clock.pending(), 1);
        slots.cancel_all();
        assert_eq!(clock.pending(), 0);
        clock.advance(20);
        assert!(fired.borrow().is_empty());
    }
}

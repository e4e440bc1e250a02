//! One-shot timers for effects that outlive the call that started them.
//!
//! A timer carries a payload instead of a callback. When it fires the host
//! receives the payload and dispatches it, so nothing scheduled ever holds
//! a reference to the entity that scheduled it.

/// Identifies a scheduled timer. The default handle refers to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimerHandle(Option<u64>);

impl TimerHandle {
    /// A handle that refers to no timer.
    pub const INVALID: Self = Self(None);

    /// Whether this handle was issued by a scheduler and not yet cleared.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Forget the timer this handle refers to.
    pub fn invalidate(&mut self) {
        self.0 = None;
    }
}

/// Schedules one-shot timers carrying a payload of type `T`.
pub trait Scheduler<T> {
    /// Fire `payload` once, `delay` seconds from now.
    fn schedule_once(&mut self, delay: f32, payload: T) -> TimerHandle;

    /// Cancel the timer behind `handle` and invalidate the handle.
    ///
    /// Cancelling an invalid, fired, or already-cancelled handle is a no-op.
    fn cancel(&mut self, handle: &mut TimerHandle);

    /// Whether the timer behind `handle` is still waiting to fire.
    fn is_pending(&self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone)]
struct PendingTimer<T> {
    id: u64,
    due: f64,
    payload: T,
}

/// Deterministic [`Scheduler`] driven by simulation time.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: f64,
    next_id: u64,
    pending: Vec<PendingTimer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current queue time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of timers waiting to fire.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Return `true` if no timers are waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance time by `delta` seconds and return the payloads of every
    /// timer that came due, earliest first. Timers due at the same instant
    /// fire in the order they were scheduled.
    pub fn advance(&mut self, delta: f32) -> Vec<T> {
        self.now += f64::from(delta);
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|t| t.payload).collect()
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule_once(&mut self, delay: f32, payload: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due: self.now + f64::from(delay.max(0.0)),
            payload,
        });
        TimerHandle(Some(id))
    }

    fn cancel(&mut self, handle: &mut TimerHandle) {
        if let Some(id) = handle.0.take() {
            self.pending.retain(|t| t.id != id);
        }
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        handle
            .0
            .is_some_and(|id| self.pending.iter().any(|t| t.id == id))
    }
}

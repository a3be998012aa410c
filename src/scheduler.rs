//! Polled timer scheduler
//!
//! Arms one-shot timers into a static table and fires them from `tick()`.
//! Single-threaded and cooperative: the host calls `tick()` from its main
//! loop; every method takes `&mut self`, so callers serialize access.
//!
//! Author: Moroya Sakamoto

use tracing::{debug, trace, warn};

use crate::clock::{Clock, SoftClock};
use crate::error::TimerError;
use crate::table::TimerTable;
use crate::timer::{Timer, TimerFn, TimerId, TIMER_MAX};

/// Timer operations available to expiry callbacks
///
/// Callbacks run while the scheduler is scanning its table; they may
/// re-arm themselves, start new timers or stop any timer.
pub trait TimerControl<A> {
    /// Arm a one-shot timer that expires after `duration_ms`
    fn start(
        &mut self,
        duration_ms: u32,
        callback: Option<TimerFn<A>>,
        arg: A,
    ) -> Result<TimerId, TimerError>;

    /// Disarm a timer; unknown or already-fired ids are ignored
    fn stop(&mut self, id: TimerId);

    /// Is `id` currently armed?
    fn is_armed(&self, id: TimerId) -> bool;
}

/// One-shot software timer scheduler
///
/// Owns the slot table, the id counter and the clock.
/// Size: N × sizeof(Option<Timer<A>>) + sizeof(C) + 4 bytes
pub struct TimerScheduler<C, A = usize, const N: usize = TIMER_MAX> {
    /// Time source
    clock: C,
    /// Static slot table
    table: TimerTable<A, N>,
    /// Last id handed out (0 = none yet)
    last_id: u32,
}

impl<C: Clock, A: Copy, const N: usize> TimerScheduler<C, A, N> {
    /// Create a scheduler with every slot free
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            table: TimerTable::new(),
            last_id: 0,
        }
    }

    /// Reset every slot to free
    ///
    /// Id numbering carries on from before, so ids still held by the host
    /// never match a timer armed after re-initialization.
    pub fn initialize(&mut self) {
        self.table.clear_all();
        debug!(capacity = N, last_id = self.last_id, "timer table initialized");
    }

    /// Release scheduler resources
    ///
    /// Disarms every timer without running callbacks. Idempotent.
    pub fn terminate(&mut self) {
        let armed = self.table.armed_count();
        self.table.clear_all();
        debug!(armed, "timer table terminated");
    }

    /// Arm a one-shot timer
    ///
    /// Takes the lowest free slot and records the current clock reading as
    /// the start time. A `None` callback is allowed: the timer simply
    /// expires and frees its slot.
    pub fn start(
        &mut self,
        duration_ms: u32,
        callback: Option<TimerFn<A>>,
        arg: A,
    ) -> Result<TimerId, TimerError> {
        let Some(idx) = self.table.find_free() else {
            warn!(capacity = N, duration_ms, "no free timer slot");
            return Err(TimerError::ResourceExhausted { capacity: N });
        };

        let id = self.next_id();
        let start_ms = self.clock.now_ms();
        self.table
            .insert(idx, Timer::new(id, duration_ms, start_ms, callback, arg));

        debug!(id = id.get(), slot = idx, duration_ms, start_ms, "timer armed");
        Ok(id)
    }

    /// Disarm a timer
    ///
    /// Stopping an id that already expired or was never armed is a no-op:
    /// cancellation races against expiry are expected.
    pub fn stop(&mut self, id: TimerId) {
        match self.table.position(id) {
            Some(idx) => {
                self.table.clear(idx);
                debug!(id = id.get(), slot = idx, "timer stopped");
            }
            None => trace!(id = id.get(), "stop of unarmed timer ignored"),
        }
    }

    /// Poll the table and fire expired timers
    ///
    /// Slots are visited once each, lowest index first, reading the clock
    /// per armed slot. An expired timer's callback runs while its slot is
    /// still armed; the slot is freed afterwards only if it still carries
    /// the same id, so callbacks that stop or re-arm timers are safe.
    ///
    /// If a callback panics, the firing slot stays armed and every other
    /// slot keeps its state; the timer fires again on the next tick.
    ///
    /// Returns the number of timers that expired.
    pub fn tick(&mut self) -> usize {
        let mut expired = 0;

        for idx in 0..N {
            let Some(timer) = self.table.get(idx).copied() else {
                continue;
            };

            let now = self.clock.now_ms();
            if !timer.is_expired(now) {
                continue;
            }

            expired += 1;
            trace!(
                id = timer.id.get(),
                slot = idx,
                late_ms = timer.elapsed(now) - timer.duration_ms,
                "timer expired"
            );

            if let Some(callback) = timer.callback {
                callback(self, timer.id, timer.arg);
            }

            self.table.clear_if(idx, timer.id);
        }

        expired
    }

    /// Is `id` currently armed?
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.table.position(id).is_some()
    }

    /// Milliseconds until `id` expires (0 if overdue, `None` if not armed)
    pub fn remaining_ms(&self, id: TimerId) -> Option<u32> {
        let now = self.clock.now_ms();
        self.table.find(id).map(|t| t.remaining(now))
    }

    /// Number of armed timers
    pub fn armed_count(&self) -> usize {
        self.table.armed_count()
    }

    /// Maximum number of concurrently armed timers
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Slot table (read-only)
    pub fn table(&self) -> &TimerTable<A, N> {
        &self.table
    }

    /// Time source
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Time source (mutable, e.g. to advance a [`SoftClock`])
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Next id, skipping 0 and any id still armed after a counter wrap
    ///
    /// Only called with a free slot, so at most N - 1 ids are armed and one
    /// of the N candidates following the counter is always available.
    fn next_id(&mut self) -> TimerId {
        let candidate = match TimerId::new(self.last_id) {
            Some(last) => last.next(),
            None => TimerId::FIRST,
        };

        // taken[k]: candidate + k is armed
        let mut taken = [false; N];
        for (_, timer) in self.table.iter() {
            let ahead = candidate.distance_to(timer.id) as usize;
            if ahead < N {
                taken[ahead] = true;
            }
        }
        let skip = taken.iter().position(|t| !t).unwrap_or(0);

        let id = candidate.skip(skip as u32);
        self.last_id = id.get();
        id
    }
}

impl<C: Clock, A: Copy, const N: usize> TimerControl<A> for TimerScheduler<C, A, N> {
    fn start(
        &mut self,
        duration_ms: u32,
        callback: Option<TimerFn<A>>,
        arg: A,
    ) -> Result<TimerId, TimerError> {
        TimerScheduler::start(self, duration_ms, callback, arg)
    }

    fn stop(&mut self, id: TimerId) {
        TimerScheduler::stop(self, id)
    }

    fn is_armed(&self, id: TimerId) -> bool {
        TimerScheduler::is_armed(self, id)
    }
}

impl<A: Copy, const N: usize> TimerScheduler<SoftClock, A, N> {
    /// Advance the software clock by `delta_ms` and poll once
    pub fn advance(&mut self, delta_ms: u32) -> usize {
        self.clock.advance(delta_ms);
        self.tick()
    }

    /// Simulate a host main loop for `total_ms`, polling every `step_ms`
    ///
    /// Returns the total number of timers that expired.
    pub fn run_for(&mut self, total_ms: u32, step_ms: u32) -> usize {
        let step_ms = step_ms.max(1);
        let mut elapsed = 0u32;
        let mut expired = 0;

        while elapsed < total_ms {
            let delta = step_ms.min(total_ms - elapsed);
            expired += self.advance(delta);
            elapsed += delta;
        }

        expired
    }
}

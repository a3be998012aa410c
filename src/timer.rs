//! Timer definition — static, no-alloc one-shot timer descriptors
//!
//! Each armed timer records when it was started, how long it runs
//! and what to call when it expires.
//!
//! Author: Moroya Sakamoto

use core::fmt;
use core::num::NonZeroU32;

use crate::scheduler::TimerControl;

/// Maximum timers a default scheduler can hold
pub const TIMER_MAX: usize = 16;

/// Expiry callback — called once, from `tick()`, with the timer's id and argument
///
/// The first parameter lets the callback start or stop timers on the
/// scheduler that is currently ticking.
pub type TimerFn<A> = fn(&mut dyn TimerControl<A>, TimerId, A);

/// Timer identifier, never zero
///
/// Unique among armed timers. Ids are handed out by an incrementing
/// counter that skips zero when it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(NonZeroU32);

impl TimerId {
    /// First id issued by a fresh scheduler
    pub const FIRST: TimerId = TimerId(NonZeroU32::MIN);

    /// Wrap a raw id; `None` for zero
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Raw id value
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Id following this one, wrapping from `u32::MAX` back to 1
    pub const fn next(self) -> Self {
        match NonZeroU32::new(self.0.get().wrapping_add(1)) {
            Some(id) => Self(id),
            None => Self::FIRST,
        }
    }

    /// Steps from this id forward to `later`, counting in the 1..=u32::MAX cycle
    pub const fn distance_to(self, later: TimerId) -> u32 {
        let span = u32::MAX as u64;
        ((later.get() as u64 + span - self.get() as u64) % span) as u32
    }

    /// Id `steps` positions after this one, wrapping past `u32::MAX` to 1
    pub const fn skip(self, steps: u32) -> Self {
        let span = u32::MAX as u64;
        let raw = ((self.get() as u64 - 1 + steps as u64) % span + 1) as u32;
        match NonZeroU32::new(raw) {
            Some(id) => Self(id),
            None => Self::FIRST,
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Armed timer — one occupied table slot
#[derive(Clone, Copy)]
pub struct Timer<A> {
    /// Identifier handed back by `start`
    pub id: TimerId,
    /// Requested period before expiry (ms)
    pub duration_ms: u32,
    /// Clock reading captured when armed (ms)
    pub start_ms: u32,
    /// Expiry callback (`None` = expire silently)
    pub callback: Option<TimerFn<A>>,
    /// Opaque argument passed through to the callback
    pub arg: A,
}

impl<A> Timer<A> {
    /// Arm a timer at clock reading `start_ms`
    pub const fn new(
        id: TimerId,
        duration_ms: u32,
        start_ms: u32,
        callback: Option<TimerFn<A>>,
        arg: A,
    ) -> Self {
        Self {
            id,
            duration_ms,
            start_ms,
            callback,
            arg,
        }
    }

    /// Milliseconds elapsed since arming (wrap-safe)
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// Has the timer reached its duration?
    ///
    /// Correct across one wrap of the 32-bit counter as long as
    /// `duration_ms` stays well below 2^32 ms. A timer that is polled
    /// less than once per wrap period can be missed.
    pub fn is_expired(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }

    /// Remaining milliseconds until expiry (0 once expired)
    pub fn remaining(&self, now_ms: u32) -> u32 {
        self.duration_ms.saturating_sub(self.elapsed(now_ms))
    }
}

impl<A: fmt::Debug> fmt::Debug for Timer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("duration_ms", &self.duration_ms)
            .field("start_ms", &self.start_ms)
            .field("callback", &self.callback.is_some())
            .field("arg", &self.arg)
            .finish()
    }
}

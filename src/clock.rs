//! Clock sources — hardware-abstract millisecond time
//!
//! The scheduler only needs a wrapping 32-bit millisecond counter.
//! On real hardware this wraps SysTick, an RTC or `clock()`;
//! for testing, [`SoftClock`] is advanced by hand.
//!
//! Author: Moroya Sakamoto

/// Source of elapsed time
pub trait Clock {
    /// Monotonic milliseconds, wrapping silently at 2^32 (~49.7 days)
    fn now_ms(&self) -> u32;

    /// Milliseconds since 1970-01-01T00:00:00 UTC (negative before the epoch)
    fn epoch_ms(&self) -> i64;
}

/// Software clock for testing and simulation
///
/// Size: 16 bytes
#[derive(Debug, Clone, Copy)]
pub struct SoftClock {
    /// Current counter value (milliseconds)
    ticks_ms: u32,
    /// Number of 2^32 ms wraps
    overflows: u32,
    /// Epoch time at counter zero
    epoch_origin_ms: i64,
}

impl SoftClock {
    /// Clock starting at zero, anchored on the Unix epoch
    pub const fn new() -> Self {
        Self::at_epoch(0)
    }

    /// Clock starting at zero, anchored on `epoch_origin_ms`
    pub const fn at_epoch(epoch_origin_ms: i64) -> Self {
        Self {
            ticks_ms: 0,
            overflows: 0,
            epoch_origin_ms,
        }
    }

    /// Clock whose counter starts at `ticks_ms` (useful near the wrap point)
    pub const fn starting_at(ticks_ms: u32) -> Self {
        Self {
            ticks_ms,
            overflows: 0,
            epoch_origin_ms: 0,
        }
    }

    /// Advance time by milliseconds
    pub fn advance(&mut self, ms: u32) {
        let new = self.ticks_ms.wrapping_add(ms);
        if new < self.ticks_ms {
            self.overflows += 1;
        }
        self.ticks_ms = new;
    }

    /// Reset counter and wrap count
    pub fn reset(&mut self) {
        self.ticks_ms = 0;
        self.overflows = 0;
    }

    /// Number of counter wraps
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Elapsed milliseconds since a reference reading (wrap-safe)
    pub fn elapsed_since(&self, reference: u32) -> u32 {
        self.ticks_ms.wrapping_sub(reference)
    }
}

impl Default for SoftClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SoftClock {
    fn now_ms(&self) -> u32 {
        self.ticks_ms
    }

    fn epoch_ms(&self) -> i64 {
        let elapsed = ((self.overflows as i64) << 32) + self.ticks_ms as i64;
        self.epoch_origin_ms.wrapping_add(elapsed)
    }
}

/// Operating-system clock
///
/// `now_ms` counts from construction, `epoch_ms` reads the wall clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Clock whose monotonic counter starts now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap.
        self.origin.elapsed().as_millis() as u32
    }

    fn epoch_ms(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as i64,
            Err(before) => -(before.duration().as_millis() as i64),
        }
    }
}

//! ALICE-Timer — polled software timers
//!
//! Arm it, poll it, forget it.
//!
//! Minimal one-shot timer facility for cooperative main loops:
//! - Static slot table (no heap, fixed capacity chosen at compile time)
//! - Polled expiry detection, callbacks run synchronously inside `tick()`
//! - Callbacks may re-arm or cancel timers while the table is being scanned
//! - Gregorian calendar decoding of epoch milliseconds
//! - Jittered wait times for broadcast/retry backoff
//!
//! ```
//! use alice_timer::{SoftClock, TimerControl, TimerId, TimerScheduler};
//!
//! fn on_expiry(_timers: &mut dyn TimerControl<usize>, _id: TimerId, _arg: usize) {}
//!
//! let mut timers: TimerScheduler<SoftClock> = TimerScheduler::new(SoftClock::new());
//! let id = timers.start(100, Some(on_expiry), 7).unwrap();
//! assert!(timers.is_armed(id));
//!
//! timers.clock_mut().advance(100);
//! assert_eq!(timers.tick(), 1);
//! assert!(!timers.is_armed(id));
//! ```
//!
//! `no_std` by default. The `std` feature adds `StdClock` and the
//! wall-clock `random_wait`; the test suite always builds with it.
//!
//! Author: Moroya Sakamoto

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod backoff;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod scheduler;
pub mod table;
pub mod timer;

#[cfg(feature = "std")]
pub use backoff::random_wait;
pub use backoff::{random_wait_with, WaitRng};
pub use calendar::{decode, CalendarFields};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, SoftClock};
pub use error::TimerError;
pub use scheduler::{TimerControl, TimerScheduler};
pub use table::TimerTable;
pub use timer::{Timer, TimerFn, TimerId, TIMER_MAX};

//! Timer errors
//!
//! Author: Moroya Sakamoto

use thiserror::Error;

/// Errors returned by the timer scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    /// Every slot of the table is armed; retry after a timer expires or is stopped
    #[error("no free timer slot (capacity {capacity})")]
    ResourceExhausted {
        /// Table capacity at the time of the failed start
        capacity: usize,
    },
}

//! Randomized backoff — jittered wait times for broadcast and retry
//!
//! Uses a small xorshift64 generator reseeded from the wall clock on every
//! call, so stations that boot together still spread their transmissions.
//! NOT cryptographically secure.
//!
//! Author: Moroya Sakamoto

use crate::clock::Clock;

/// xorshift64 pseudo-random generator
#[derive(Debug, Clone)]
pub struct WaitRng {
    state: u64,
}

impl WaitRng {
    /// Generator seeded from `seed` (any value, including 0)
    pub const fn new(seed: u64) -> Self {
        Self {
            state: splitmix64(seed),
        }
    }

    /// Replace the generator state
    pub fn reseed(&mut self, seed: u64) {
        self.state = splitmix64(seed);
    }

    /// Next pseudo-random u64
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Next pseudo-random u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Pseudo-random value in `[0, bound)`
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be non-zero");
        self.next_u32() % bound
    }
}

/// Random wait in `[0, max_wait_ms)`, reseeded from `clock`'s epoch time
///
/// # Panics
///
/// `max_wait_ms` must be non-zero; zero is a caller bug and panics.
pub fn random_wait_with<C: Clock + ?Sized>(clock: &C, max_wait_ms: u32) -> u32 {
    assert!(max_wait_ms > 0, "max_wait_ms must be non-zero");
    WaitRng::new(clock.epoch_ms() as u64).next_below(max_wait_ms)
}

/// Random wait in `[0, max_wait_ms)`, reseeded from the system wall clock
///
/// # Panics
///
/// `max_wait_ms` must be non-zero; zero is a caller bug and panics.
#[cfg(feature = "std")]
pub fn random_wait(max_wait_ms: u32) -> u32 {
    random_wait_with(&crate::clock::StdClock::new(), max_wait_ms)
}

/// splitmix64 finalizer, spreads nearby seeds and never yields 0
const fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    if z == 0 {
        1
    } else {
        z
    }
}

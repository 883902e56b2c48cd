//! Monotonic counter abstraction backing the busy-wait settle timer.

/// Free-running monotonic counter.
///
/// The counter is allowed to wrap: only its low [`Clock::COUNTER_BITS`] bits
/// are meaningful, and consumers compute elapsed time modulo that width.
pub trait Clock {
    /// Counter frequency in Hz.
    const TICK_HZ: u64;

    /// Width of the counter before it wraps back to zero (1 to 64).
    const COUNTER_BITS: u32 = 64;

    /// Current counter value.
    fn now(&mut self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    const TICK_HZ: u64 = C::TICK_HZ;
    const COUNTER_BITS: u32 = C::COUNTER_BITS;

    #[inline]
    fn now(&mut self) -> u64 {
        C::now(self)
    }
}

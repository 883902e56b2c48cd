//! Busy-wait settle timer built on a wrapping monotonic counter.
//!
//! Elapsed time is always measured as `(now - start) mod 2^COUNTER_BITS`.
//! A counter wraparound during the wait therefore neither ends the wait early
//! nor leaves it spinning until the next wraparound.
use embassy_time::{Duration, Instant, TICK_HZ};

use crate::protocol::transport::traits::{clock::Clock, settle_timer::SettleTimer};

/// [`SettleTimer`] spinning on a [`Clock`].
#[derive(Debug)]
pub struct ClockDelay<C: Clock> {
    clock: C,
}

impl<C: Clock> ClockDelay<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Give the clock back.
    pub fn into_inner(self) -> C {
        self.clock
    }

    /// Spin until `ticks` counter ticks have elapsed. `ticks` must be smaller
    /// than one counter period.
    fn wait_ticks(&mut self, ticks: u64) {
        let mask = counter_mask(C::COUNTER_BITS);
        let start = self.clock.now() & mask;
        loop {
            let elapsed = (self.clock.now() & mask).wrapping_sub(start) & mask;
            if elapsed >= ticks {
                break;
            }
            core::hint::spin_loop();
        }
    }
}

impl<C: Clock> SettleTimer for ClockDelay<C> {
    fn wait(&mut self, duration: Duration) {
        let mut remaining = ticks_for(duration, C::TICK_HZ);
        // One measurement must stay well inside a counter period, otherwise a
        // late poll could alias a full period to zero.
        let span = (counter_mask(C::COUNTER_BITS) >> 1).max(1);
        while remaining > 0 {
            let step = remaining.min(span);
            self.wait_ticks(step);
            remaining -= step;
        }
    }
}

/// Low `bits` bits set.
pub(crate) const fn counter_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else if bits == 0 {
        1
    } else {
        (1u64 << bits) - 1
    }
}

/// Number of ticks covering at least `duration` at `tick_hz`.
pub(crate) fn ticks_for(duration: Duration, tick_hz: u64) -> u64 {
    let ticks = (duration.as_micros() as u128 * tick_hz as u128).div_ceil(1_000_000);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// [`Clock`] reading the `embassy-time` driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    const TICK_HZ: u64 = TICK_HZ;

    #[inline]
    fn now(&mut self) -> u64 {
        Instant::now().as_ticks()
    }
}

/// Settle timer spinning on the `embassy-time` driver.
pub type EmbassyDelay = ClockDelay<EmbassyClock>;

impl Default for EmbassyDelay {
    fn default() -> Self {
        Self::new(EmbassyClock)
    }
}

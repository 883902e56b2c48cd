//! Blocking timer abstraction used to wait out the EEPROM write cycle.
use embassy_time::Duration;

/// Blocks the calling thread for at least the requested duration.
pub trait SettleTimer {
    /// Return no earlier than `duration` after the call started.
    fn wait(&mut self, duration: Duration);
}

impl<T: SettleTimer + ?Sized> SettleTimer for &mut T {
    #[inline]
    fn wait(&mut self, duration: Duration) {
        T::wait(self, duration)
    }
}

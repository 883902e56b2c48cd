//! Minimal abstraction for a blocking I2C bus. Allows the driver to plug into
//! various implementations (embedded HAL, OS driver, simulator) without
//! branching on the target inside the driver itself.

/// One logical device address bound to the bus.
///
/// Every call is a complete bus transaction: START, transfer(s), STOP. The
/// implementation owns any bus-wide locking needed when other peripherals
/// share the same wires.
pub trait I2cDevice {
    type Error: core::fmt::Debug;

    /// Transmit `bytes` in one write transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Transmit `bytes`, then clock `buffer.len()` bytes back after a repeated
    /// START, without releasing the bus between both phases.
    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Clock `buffer.len()` bytes back without a write phase.
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// Shared bus able to hand out device bindings.
pub trait I2cBus {
    type Device: I2cDevice;

    /// Bind the 7-bit `address` to this bus. Called once per logical address
    /// while the driver initializes.
    fn attach(
        &mut self,
        address: u8,
    ) -> Result<Self::Device, <Self::Device as I2cDevice>::Error>;
}

impl<D: I2cDevice + ?Sized> I2cDevice for &mut D {
    type Error = D::Error;

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        D::write(self, bytes)
    }

    #[inline]
    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        D::write_read(self, bytes, buffer)
    }

    #[inline]
    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        D::read(self, buffer)
    }
}

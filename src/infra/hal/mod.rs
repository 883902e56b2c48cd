//! Bus adapter for any `embedded-hal` 1.0 blocking I2C peripheral.
//!
//! The peripheral lives in an [`embassy_sync::blocking_mutex::Mutex`] so the
//! two EEPROM addresses (and any other driver on the same wires) can share
//! it. The lock is held for exactly one transaction.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embedded_hal::i2c::I2c;
use thiserror_no_std::Error;

use crate::protocol::transport::traits::i2c_bus::{I2cBus, I2cDevice};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Failures of the `embedded-hal` adapter.
pub enum HalError<E: core::fmt::Debug> {
    /// Error reported by the HAL peripheral.
    #[error("I2C peripheral error: {0:?}")]
    I2c(E),
    /// Only 7-bit addresses can be attached.
    #[error("Invalid 7-bit address {0:#04x}")]
    InvalidAddress(u8),
}

/// Shared `embedded-hal` I2C bus.
pub struct HalBus<'a, M: RawMutex, I2C> {
    bus: &'a Mutex<M, RefCell<I2C>>,
}

impl<'a, M: RawMutex, I2C: I2c> HalBus<'a, M, I2C> {
    pub fn new(bus: &'a Mutex<M, RefCell<I2C>>) -> Self {
        Self { bus }
    }
}

impl<'a, M: RawMutex, I2C: I2c> I2cBus for HalBus<'a, M, I2C> {
    type Device = HalDevice<'a, M, I2C>;

    fn attach(&mut self, address: u8) -> Result<Self::Device, HalError<I2C::Error>> {
        if address > 0x7F {
            return Err(HalError::InvalidAddress(address));
        }
        Ok(HalDevice {
            bus: self.bus,
            address,
        })
    }
}

/// One 7-bit address on a [`HalBus`].
pub struct HalDevice<'a, M: RawMutex, I2C> {
    bus: &'a Mutex<M, RefCell<I2C>>,
    address: u8,
}

impl<M: RawMutex, I2C> HalDevice<'_, M, I2C> {
    /// Bound 7-bit address.
    pub fn address(&self) -> u8 {
        self.address
    }
}

impl<M: RawMutex, I2C: I2c> I2cDevice for HalDevice<'_, M, I2C> {
    type Error = HalError<I2C::Error>;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let address = self.address;
        self.bus
            .lock(|bus| bus.borrow_mut().write(address, bytes))
            .map_err(HalError::I2c)
    }

    fn write_read(&mut self, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        let address = self.address;
        self.bus
            .lock(|bus| bus.borrow_mut().write_read(address, bytes, buffer))
            .map_err(HalError::I2c)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let address = self.address;
        self.bus
            .lock(|bus| bus.borrow_mut().read(address, buffer))
            .map_err(HalError::I2c)
    }
}

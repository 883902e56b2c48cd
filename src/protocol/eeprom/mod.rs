//! AT24CS0x device handle.
//!
//! One physical chip answers on two bus addresses: the memory array on the
//! base address and the read-only serial number region on the base address
//! with bit 3 set. [`At24cs0x::init`] binds both from the same bus and the
//! handle owns them together, so a memory binding can never be paired with
//! another chip's serial number binding.
//!
//! Every operation is blocking and runs to completion on the caller's thread.
//! The handle is not meant to be shared: overlapping operations could
//! interleave page transactions, and the device has no transactional write.
//! Callers needing concurrent access serialize it themselves.
use crate::core::{
    Geometry, Model, SerialNumber, ADDRESS_WINDOW, SERIAL_NUMBER_LEN, SERIAL_NUMBER_OFFSET,
};
use crate::error::Error;
use crate::infra::framing::{transmit_read, transmit_write};
use crate::protocol::transport::page_split::PageChunks;
use crate::protocol::transport::traits::{
    i2c_bus::{I2cBus, I2cDevice},
    settle_timer::SettleTimer,
};

pub mod config;

pub use config::Config;

/// Driver for one AT24CS0x chip.
///
/// `D` is the bus binding for one address, `T` the wait used after each page
/// write.
pub struct At24cs0x<D: I2cDevice, T: SettleTimer> {
    memory: D,
    serial: D,
    timer: T,
    config: Config,
}

impl<D, T> At24cs0x<D, T>
where
    D: I2cDevice,
    T: SettleTimer,
{
    /// Bind the memory and serial number addresses of one chip on `bus`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBaseAddress`] when `config.base_address` is not
    ///   `0x50..=0x57`; nothing is attached.
    /// - [`Error::Attach`] when the bus refuses one of the two addresses; the
    ///   handle is not created.
    pub fn init<B>(bus: &mut B, config: Config, timer: T) -> Result<Self, Error<D::Error>>
    where
        B: I2cBus<Device = D>,
    {
        if !config.has_valid_base_address() {
            return Err(Error::InvalidBaseAddress(config.base_address));
        }

        let memory = attach(bus, config.base_address)?;
        let serial = attach(bus, config.serial_number_address())?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "at24cs0x attached: memory {=u8:#x}, serial {=u8:#x}",
            config.base_address,
            config.serial_number_address()
        );

        Ok(Self {
            memory,
            serial,
            timer,
            config,
        })
    }

    /// Hand back the bus bindings and the timer, memory binding first.
    pub fn release(self) -> (D, D, T) {
        (self.memory, self.serial, self.timer)
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fitted part.
    pub fn model(&self) -> Model {
        self.config.model
    }

    /// Page geometry of the fitted part.
    pub fn geometry(&self) -> Geometry {
        self.config.model.geometry()
    }

    /// Write `payload` starting at word address `start`.
    ///
    /// The payload is split so that no transaction crosses a page boundary;
    /// the write cycle time is waited out after every page transaction.
    ///
    /// On the 128-byte part, addresses from 128 up alias the lower half.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTransfer`] / [`Error::OutOfRange`]: rejected before any
    ///   bus activity.
    /// - [`Error::Write`]: a page transaction failed. The first `committed`
    ///   bytes are written, the rest was not attempted; the range must be
    ///   re-verified by the caller.
    pub fn write(&mut self, start: u8, payload: &[u8]) -> Result<(), Error<D::Error>> {
        check_window(start, payload.len())?;

        let mut committed = 0;
        for chunk in PageChunks::new(start, payload.len()) {
            #[cfg(feature = "defmt")]
            defmt::trace!("page chunk {=u8:#x} +{}", chunk.address, chunk.len);

            transmit_write(&mut self.memory, chunk.address, chunk.of(payload)).map_err(
                |error| match error {
                    Error::Bus(error) => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!(
                            "page write failed at {=u8:#x}, {} bytes committed",
                            chunk.address,
                            committed
                        );
                        Error::Write { committed, error }
                    }
                    other => other,
                },
            )?;

            self.timer.wait(self.config.write_cycle);
            committed += chunk.len;
        }

        Ok(())
    }

    /// Write one byte, then wait out the write cycle.
    pub fn write_byte(&mut self, address: u8, value: u8) -> Result<(), Error<D::Error>> {
        transmit_write(&mut self.memory, address, &[value])?;
        self.timer.wait(self.config.write_cycle);
        Ok(())
    }

    /// Write at most one page in a single transaction, then wait out the
    /// write cycle.
    ///
    /// # Errors
    ///
    /// [`Error::PageOverflow`] when `bytes` would run past the end of the page
    /// holding `start` (the device would wrap and overwrite the page head).
    pub fn write_page(&mut self, start: u8, bytes: &[u8]) -> Result<(), Error<D::Error>> {
        if bytes.is_empty() {
            return Err(Error::EmptyTransfer);
        }
        if bytes.len() > self.geometry().room_in_page(start) {
            return Err(Error::PageOverflow {
                start,
                len: bytes.len(),
            });
        }

        transmit_write(&mut self.memory, start, bytes)?;
        self.timer.wait(self.config.write_cycle);
        Ok(())
    }

    /// Fill `buffer` with the bytes starting at word address `start`.
    ///
    /// One write-then-read transaction: the device increments its address
    /// pointer across page boundaries while reading.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTransfer`] / [`Error::OutOfRange`]: rejected before any
    ///   bus activity.
    /// - [`Error::Bus`]: the transaction failed; `buffer` content is unspecified.
    pub fn read(&mut self, start: u8, buffer: &mut [u8]) -> Result<(), Error<D::Error>> {
        check_window(start, buffer.len())?;
        transmit_read(&mut self.memory, start, buffer)
    }

    /// Random read of a single byte.
    pub fn read_byte(&mut self, address: u8) -> Result<u8, Error<D::Error>> {
        let mut byte = [0u8; 1];
        transmit_read(&mut self.memory, address, &mut byte)?;
        Ok(byte[0])
    }

    /// Read from the device's internal address pointer, wherever the previous
    /// operation left it (last accessed address + 1).
    pub fn read_current(&mut self, buffer: &mut [u8]) -> Result<(), Error<D::Error>> {
        if buffer.is_empty() {
            return Err(Error::EmptyTransfer);
        }
        self.memory.read(buffer).map_err(Error::Bus)
    }

    /// Read the 16-byte factory serial number from the secondary address.
    pub fn read_serial_number(&mut self) -> Result<SerialNumber, Error<D::Error>> {
        let mut serial_number = [0u8; SERIAL_NUMBER_LEN];
        transmit_read(&mut self.serial, SERIAL_NUMBER_OFFSET, &mut serial_number)?;
        Ok(SerialNumber(serial_number))
    }
}

fn attach<B: I2cBus>(
    bus: &mut B,
    address: u8,
) -> Result<B::Device, Error<<B::Device as I2cDevice>::Error>> {
    bus.attach(address).map_err(|error| {
        #[cfg(feature = "defmt")]
        defmt::error!("failed to attach {=u8:#x}", address);
        Error::Attach { address, error }
    })
}

/// Accept `len` bytes from `start` only while the last one stays inside the
/// one-byte address window.
fn check_window<E: core::fmt::Debug>(start: u8, len: usize) -> Result<(), Error<E>> {
    if len == 0 {
        return Err(Error::EmptyTransfer);
    }
    if len > ADDRESS_WINDOW - start as usize {
        return Err(Error::OutOfRange { start, len });
    }
    Ok(())
}

//! Addressing and framing engine: turns a word address and a payload into the
//! exact byte sequence of one bus transaction, then hands it to the device.
//!
//! The engine is stateless. Each call builds its own stack buffer sized for
//! one page of payload plus the address byte.
use crate::core::PAGE_SIZE;
use crate::error::{Error, FramingError};
use crate::protocol::transport::traits::i2c_bus::I2cDevice;

/// Largest transaction the driver ever writes: address byte + one page.
pub const MAX_FRAME_LEN: usize = PAGE_SIZE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Bytes of one write transaction, as placed on the bus.
pub struct Frame {
    len: usize,
    data: [u8; MAX_FRAME_LEN],
}

impl Frame {
    /// Word address the payload is written to.
    #[inline]
    pub fn word_address(&self) -> u8 {
        self.data[0]
    }

    /// Payload bytes following the address byte.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[1..self.len]
    }

    /// Whole transaction: address byte then payload.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Number of bytes on the bus.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// A frame always carries at least its address byte.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Build the write frame `[word_address, payload...]`.
pub fn frame_write(word_address: u8, payload: &[u8]) -> Result<Frame, FramingError> {
    if payload.len() > PAGE_SIZE {
        return Err(FramingError::PayloadTooLong {
            len: payload.len(),
            max: PAGE_SIZE,
        });
    }

    let mut data = [0u8; MAX_FRAME_LEN];
    data[0] = word_address;
    data[1..=payload.len()].copy_from_slice(payload);

    Ok(Frame {
        len: payload.len() + 1,
        data,
    })
}

/// Frame `payload` at `word_address` and send it as one write transaction.
///
/// Nothing reaches the bus when framing fails; an adapter failure is returned
/// as [`Error::Bus`].
pub fn transmit_write<D: I2cDevice>(
    device: &mut D,
    word_address: u8,
    payload: &[u8],
) -> Result<(), Error<D::Error>> {
    let frame = frame_write(word_address, payload)?;

    #[cfg(feature = "defmt")]
    defmt::trace!("write frame: {=u8:#x} +{} bytes", word_address, payload.len());

    device.write(frame.as_slice()).map_err(Error::Bus)
}

/// Random read: send `word_address` as the write phase, then fill `buffer`
/// in the read phase of the same transaction.
///
/// `buffer` is left in an unspecified state on failure and must not be
/// interpreted by the caller.
pub fn transmit_read<D: I2cDevice>(
    device: &mut D,
    word_address: u8,
    buffer: &mut [u8],
) -> Result<(), Error<D::Error>> {
    #[cfg(feature = "defmt")]
    defmt::trace!("read frame: {=u8:#x} +{} bytes", word_address, buffer.len());

    device
        .write_read(&[word_address], buffer)
        .map_err(Error::Bus)
}

//! Error definitions shared across library modules.
//! The driver performs no retries: every failure is reported to the caller
//! as soon as it is detected.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
/// Misuse of the framing engine (never caused by the bus).
pub enum FramingError {
    /// A single transaction can carry at most one page of payload.
    #[error("Payload too long for one transaction -> asked: {len}, max: {max}")]
    PayloadTooLong { len: usize, max: usize },
}

#[derive(Error, Debug)]
/// Errors returned by the device handle. `E` is the bus adapter error.
pub enum Error<E: core::fmt::Debug> {
    /// The requested range leaves the one-byte address window.
    /// Detected before any bus activity.
    #[error("Address range out of window: start {start:#04x}, length {len}")]
    OutOfRange { start: u8, len: usize },

    /// Zero-length transfers are rejected before any bus activity.
    #[error("Empty transfer")]
    EmptyTransfer,

    /// A single page write would wrap inside its page.
    #[error("Page overflow: start {start:#04x}, length {len}")]
    PageOverflow { start: u8, len: usize },

    /// The adapter reported a failure (NACK, arbitration loss, timeout).
    #[error("I2C bus error: {0:?}")]
    Bus(E),

    /// A page-split write failed part way. The first `committed` bytes of the
    /// payload were acknowledged by the device and stay written; nothing after
    /// them was attempted.
    #[error("Write aborted after {committed} committed bytes: {error:?}")]
    Write { committed: usize, error: E },

    /// A logical device address could not be bound to the bus at init.
    #[error("Unable to attach device {address:#04x}: {error:?}")]
    Attach { address: u8, error: E },

    /// The base address must be one of the eight A2..A0 strapping options.
    #[error("Invalid base address {0:#04x}")]
    InvalidBaseAddress(u8),

    /// Internal framing misuse.
    #[error(transparent)]
    Framing(#[from] FramingError),
}

impl<E: core::fmt::Debug> Error<E> {
    /// True when the failure happened before anything reached the bus.
    pub fn is_rejected_before_bus(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. }
                | Error::EmptyTransfer
                | Error::PageOverflow { .. }
                | Error::InvalidBaseAddress(_)
                | Error::Framing(_)
        )
    }
}

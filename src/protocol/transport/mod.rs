//! EEPROM transport layer: page-boundary planning and the collaborator
//! traits (bus, clock, settle timer) the driver talks through.
//!
//! ## AT24CS0x Bus Constants
//!
//! Addresses and delays taken from the AT24CS01/AT24CS02 datasheet.

pub mod page_split;
pub mod traits;

/// Maximum self-timed write cycle duration t_WR (ms).
///
/// After the STOP condition of a byte or page write the device commits the
/// page to non-volatile memory and does not acknowledge its address until the
/// cycle completes. The driver waits this long after every page transaction.
///
/// # Recommended Values
///
/// - **5 ms**: datasheet maximum over the full voltage and temperature range.
/// - Shorter values are only safe on parts characterised for it.
pub const WRITE_CYCLE_TIME_MS: u64 = 5;

/// Default 7-bit address of the memory array (A2..A0 strapped low).
pub const DEFAULT_BASE_ADDRESS: u8 = 0x50;

/// Bit distinguishing the serial number address (`1011_A2A1A0`) from the
/// memory address (`1010_A2A1A0`).
pub const SERIAL_NUMBER_ADDRESS_BIT: u8 = 0x08;

/// Mask of the A2..A0 strapping bits inside a device address.
pub const STRAP_MASK: u8 = 0x07;

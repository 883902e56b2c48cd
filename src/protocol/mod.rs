//! High-level components of the AT24CS0x protocol: the device handle and the
//! page-aware transport it drives.
pub mod eeprom;
pub mod transport;

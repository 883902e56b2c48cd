//! `at24cs0x` library: `no_std` driver for the AT24CS01/AT24CS02 serial
//! EEPROMs. The crate exposes the bus and timing abstractions the driver is
//! built on, the page-aware transaction logic, and the device handle that ties
//! the primary (memory) and secondary (serial number) bus addresses together.
#![no_std]
//==================================================================================
/// Device geometry and shared data types (models, pages, serial number).
pub mod core;
/// Driver errors: address window violations, bus failures, framing misuse.
pub mod error;
/// Low-level building blocks: transaction framing, settle wait, bus adapters.
pub mod infra;
/// EEPROM protocol: page-split transport, collaborator traits, device handle.
pub mod protocol;
//==================================================================================

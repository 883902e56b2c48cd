//! Driver configuration: which part is fitted, how it is strapped, and how
//! long its write cycle lasts.
use embassy_time::Duration;

use crate::core::Model;
use crate::protocol::transport::{
    DEFAULT_BASE_ADDRESS, SERIAL_NUMBER_ADDRESS_BIT, STRAP_MASK, WRITE_CYCLE_TIME_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static configuration for one AT24CS0x chip.
pub struct Config {
    /// Fitted part.
    pub model: Model,
    /// 7-bit memory address, `0x50` plus the A2..A0 strapping.
    pub base_address: u8,
    /// Time the device needs to commit one page write.
    pub write_cycle: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Model::default(),
            base_address: DEFAULT_BASE_ADDRESS,
            write_cycle: Duration::from_millis(WRITE_CYCLE_TIME_MS),
        }
    }
}

impl Config {
    /// Defaults for `model`.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Select the fitted part.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Set the memory address. The serial number address follows it.
    pub fn with_base_address(mut self, base_address: u8) -> Self {
        self.base_address = base_address;
        self
    }

    /// Override the write cycle wait.
    pub fn with_write_cycle(mut self, write_cycle: Duration) -> Self {
        self.write_cycle = write_cycle;
        self
    }

    /// True when `base_address` is `1010_A2A1A0`.
    pub fn has_valid_base_address(&self) -> bool {
        self.base_address & !STRAP_MASK == DEFAULT_BASE_ADDRESS
    }

    /// 7-bit address of the serial number region (`1011_A2A1A0`).
    pub fn serial_number_address(&self) -> u8 {
        self.base_address | SERIAL_NUMBER_ADDRESS_BIT
    }
}

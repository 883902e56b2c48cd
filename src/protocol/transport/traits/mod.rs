//! Abstraction traits used by the driver (I2C bus, monotonic clock, settle timer).
pub mod clock;
pub mod i2c_bus;
pub mod settle_timer;

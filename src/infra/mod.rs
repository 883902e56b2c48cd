//! Infrastructure shared by the protocol layer: transaction framing, the
//! busy-wait settle timer, and optional bus adapters.
pub mod framing;
#[cfg(feature = "embedded-hal")]
pub mod hal;
pub mod timing;

//! Target wiring. The ESP32-C3 build drives real pins and the I2C bus; any
//! other target only offers the synthetic source.

#[cfg(target_os = "espidf")]
mod esp;
#[cfg(target_os = "espidf")]
pub use esp::{init_logging, start};

#[cfg(not(target_os = "espidf"))]
mod host;
#[cfg(not(target_os = "espidf"))]
pub use host::{init_logging, start};

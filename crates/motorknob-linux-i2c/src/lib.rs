//! motorknob-linux-i2c - Linux i2c-dev transport
//!
//! This crate talks to the knob through the `/dev/i2c-N` character devices
//! using SMBus word transfers.
//!
//! # Example
//!
//! ```no_run
//! use motorknob_linux_i2c::{LinuxI2c, LinuxI2cConfig};
//! use motorknob_core::bus::WordBus;
//!
//! let config = LinuxI2cConfig::new("/dev/i2c-1").with_address(0x55);
//! let mut bus = LinuxI2c::open(&config)?;
//!
//! // Read the detent count register
//! let word = bus.read_word_data(0x02)?;
//! println!("detents: {}", word);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage with the motorknob CLI
//!
//! ```bash
//! # Instantiate the device first
//! echo motorknob 0x55 > /sys/bus/i2c/devices/i2c-1/new_device
//!
//! motorknob tree -b linux_i2c:dev=/dev/i2c-1,addr=0x55
//! motorknob read -b linux_i2c:dev=/dev/i2c-1 /motorknob/position
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with i2c-dev (`CONFIG_I2C_CHARDEV`)
//! - Read/write access to `/dev/i2c-N` (usually the `i2c` group)
//! - An adapter that supports SMBus word data transfers

pub mod device;
pub mod error;

// Re-exports
pub use device::{parse_options, LinuxI2c, LinuxI2cConfig, DEFAULT_ADDRESS};
pub use error::{LinuxI2cError, Result};

/// Open a Linux I2C device and return a boxed bus
///
/// This is a convenience function for use in the bus registry.
///
/// # Example Options
///
/// - `dev=/dev/i2c-1` - Optional: device path (default: /dev/i2c-1)
/// - `addr=0x55` - Optional: 7-bit device address (default: 0x55)
pub fn open_linux_i2c(
    options: &[(&str, &str)],
) -> std::result::Result<motorknob_core::bus::BoxedBus, Box<dyn std::error::Error>> {
    let config = parse_options(options)?;
    let bus = LinuxI2c::open(&config)?;
    Ok(Box::new(bus))
}

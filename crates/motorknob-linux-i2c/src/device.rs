//! Linux I2C device implementation
//!
//! This module provides the `LinuxI2c` struct that implements the `WordBus`
//! trait using the i2c-dev `I2C_SMBUS` ioctl.

use crate::error::{LinuxI2cError, Result};

use motorknob_core::bus::WordBus;
use motorknob_core::TransportError;

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Default adapter device
const DEFAULT_DEVICE: &str = "/dev/i2c-1";

/// Default 7-bit address of the knob
pub const DEFAULT_ADDRESS: u16 = 0x55;

/// Linux i2c-dev ioctl constants
mod ioctl {
    use nix::{ioctl_read_bad, ioctl_write_int_bad, ioctl_write_ptr_bad};

    /// Select the target address
    const I2C_SLAVE: u32 = 0x0703;
    /// Query adapter functionality
    const I2C_FUNCS: u32 = 0x0705;
    /// SMBus transfer
    const I2C_SMBUS: u32 = 0x0720;

    pub const I2C_SMBUS_READ: u8 = 1;
    pub const I2C_SMBUS_WRITE: u8 = 0;
    pub const I2C_SMBUS_WORD_DATA: u32 = 3;

    pub const I2C_FUNC_SMBUS_READ_WORD_DATA: libc::c_ulong = 0x0020_0000;
    pub const I2C_FUNC_SMBUS_WRITE_WORD_DATA: libc::c_ulong = 0x0040_0000;

    /// Size of `union i2c_smbus_data` (block of 32 + length + PEC)
    pub const I2C_SMBUS_DATA_SIZE: usize = 34;

    /// Matches the kernel's `struct i2c_smbus_ioctl_data`
    #[repr(C)]
    pub struct SmbusIoctlData {
        pub read_write: u8,
        pub command: u8,
        pub size: u32,
        pub data: *mut [u8; I2C_SMBUS_DATA_SIZE],
    }

    ioctl_write_int_bad!(i2c_slave, I2C_SLAVE);
    ioctl_read_bad!(i2c_funcs, I2C_FUNCS, libc::c_ulong);
    ioctl_write_ptr_bad!(i2c_smbus, I2C_SMBUS, SmbusIoctlData);
}

/// Configuration for opening a Linux I2C device
#[derive(Debug, Clone)]
pub struct LinuxI2cConfig {
    /// Device path (e.g., "/dev/i2c-1")
    pub device: String,
    /// 7-bit target address (default: 0x55)
    pub address: u16,
}

impl Default for LinuxI2cConfig {
    fn default() -> Self {
        Self {
            device: DEFAULT_DEVICE.to_string(),
            address: DEFAULT_ADDRESS,
        }
    }
}

impl LinuxI2cConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the target address
    pub fn with_address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }
}

/// SMBus word transport over i2c-dev
pub struct LinuxI2c {
    /// File handle for the adapter, bound to the target address
    file: File,
}

impl LinuxI2c {
    /// Open an adapter and bind it to the configured address
    pub fn open(config: &LinuxI2cConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxI2cError::NoDevice);
        }
        if config.address > 0x7F {
            return Err(LinuxI2cError::InvalidParameter(format!(
                "address 0x{:X} is not a 7-bit address",
                config.address
            )));
        }

        log::debug!("linux_i2c: Opening device {}", config.device);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxI2cError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        let fd = file.as_raw_fd();

        let mut funcs: libc::c_ulong = 0;
        // SAFETY: fd is an open i2c-dev file and funcs outlives the call
        unsafe {
            ioctl::i2c_funcs(fd, &mut funcs).map_err(|e| {
                LinuxI2cError::FuncsFailed(std::io::Error::from_raw_os_error(e as i32))
            })?;
        }
        if funcs & ioctl::I2C_FUNC_SMBUS_READ_WORD_DATA == 0 {
            return Err(LinuxI2cError::Unsupported("SMBus read word data"));
        }
        if funcs & ioctl::I2C_FUNC_SMBUS_WRITE_WORD_DATA == 0 {
            return Err(LinuxI2cError::Unsupported("SMBus write word data"));
        }

        // SAFETY: plain integer argument
        unsafe {
            ioctl::i2c_slave(fd, libc::c_int::from(config.address)).map_err(|e| {
                LinuxI2cError::SetAddressFailed {
                    address: config.address,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        log::info!(
            "linux_i2c: Opened {} (addr=0x{:02X})",
            config.device,
            config.address
        );

        Ok(Self { file })
    }

    /// Perform one SMBus word transfer
    ///
    /// Returns the negative errno on failure, as the kernel's
    /// `i2c_smbus_*_word_data` helpers do.
    fn smbus_word(
        &mut self,
        read_write: u8,
        command: u8,
        word: u16,
    ) -> std::result::Result<u16, TransportError> {
        let mut data = [0u8; ioctl::I2C_SMBUS_DATA_SIZE];
        data[..2].copy_from_slice(&word.to_ne_bytes());

        let args = ioctl::SmbusIoctlData {
            read_write,
            command,
            size: ioctl::I2C_SMBUS_WORD_DATA,
            data: &mut data,
        };

        // SAFETY: args and data live across the call; the kernel writes at
        // most I2C_SMBUS_DATA_SIZE bytes into data
        unsafe { ioctl::i2c_smbus(self.file.as_raw_fd(), &args) }
            .map_err(|e| TransportError::new(-(e as i32)))?;

        Ok(u16::from_ne_bytes([data[0], data[1]]))
    }
}

impl WordBus for LinuxI2c {
    fn read_word_data(&mut self, command: u8) -> std::result::Result<u16, TransportError> {
        self.smbus_word(ioctl::I2C_SMBUS_READ, command, 0)
    }

    fn write_word_data(
        &mut self,
        command: u8,
        word: u16,
    ) -> std::result::Result<(), TransportError> {
        self.smbus_word(ioctl::I2C_SMBUS_WRITE, command, word)?;
        Ok(())
    }
}

/// Parse a number as hex (`0x` prefix) or decimal
fn parse_number(value: &str) -> std::result::Result<u16, String> {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value {}: {}", value, e))
    } else {
        value
            .parse::<u16>()
            .map_err(|e| format!("Invalid number {}: {}", value, e))
    }
}

/// Parse bus options from a list of key-value pairs
pub fn parse_options(options: &[(&str, &str)]) -> std::result::Result<LinuxI2cConfig, String> {
    let mut config = LinuxI2cConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "addr" | "address" => {
                let address = parse_number(value)?;
                if address > 0x7F {
                    return Err(format!("Invalid address: {} (must be 0x00-0x7F)", value));
                }
                config.address = address;
            }
            _ => {
                log::warn!("linux_i2c: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.device.is_empty() {
        return Err("No device specified. Use dev=/dev/i2c-N".to_string());
    }

    Ok(config)
}

//! Bus transport abstraction
//!
//! This module defines the narrow interface the core uses to reach the
//! physical device. Transports (Linux i2c-dev, the in-memory emulator)
//! implement [`WordBus`].

#[cfg(test)]
pub(crate) mod mock;
mod traits;

pub use traits::*;

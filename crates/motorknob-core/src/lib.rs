//! motorknob-core - Control layer for the motorknob rotary input device
//!
//! The knob is a motor-driven encoder that sits on an SMBus/I2C bus and
//! exposes four 16-bit registers. This crate turns those registers into a
//! small permission-gated attribute tree:
//!
//! ```text
//! /motorknob/position                 (0440)  current position
//! /motorknob/profile/detents          (0660)  detent count
//! /motorknob/profile/start_position   (0660)  start position
//! /motorknob/profile/end_position     (0660)  end position
//! ```
//!
//! # Layers
//!
//! - [`protocol`] - command codes and word encoding, no state
//! - [`session`] - the one live bus handle, serialized behind a mutex
//! - [`attr`] - attribute nodes delegating to the protocol and session
//! - [`namespace`] - the host hierarchy the nodes are published into
//! - [`lifecycle`] - transactional attach and detach
//!
//! # Example
//!
//! ```ignore
//! use motorknob_core::lifecycle::Lifecycle;
//! use motorknob_core::namespace::MemoryNamespace;
//!
//! let mut ns = MemoryNamespace::new();
//! let mut knob = Lifecycle::new();
//! knob.attach(&mut ns, Box::new(bus))?;
//!
//! ns.write("/motorknob/profile/detents", &[0x00, 0x18])?;
//! let pos = ns.read("/motorknob/position")?;
//!
//! knob.detach(&mut ns)?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod attr;
pub mod bus;
pub mod error;
pub mod lifecycle;
pub mod namespace;
pub mod protocol;
pub mod session;

pub use error::{Error, Result, TransportError};

//! motorknob-host - Host-side wiring for the motorknob
//!
//! This crate plays the part the kernel plays for a real driver:
//!
//! - [`driver`] matches device ids and turns probe/remove events into
//!   attach/detach
//! - [`registry`] opens a bus transport from a `name:key=value,...` string
//! - [`handle`] owns a namespace plus driver and gives path-based access
//!
//! # Example
//!
//! ```ignore
//! use motorknob_host::open_knob;
//!
//! let mut knob = open_knob("dummy", "motorknob")?;
//! knob.write("/motorknob/profile/detents", &[0x00, 0x18])?;
//! let bytes = knob.read("/motorknob/position")?;
//! knob.detach()?;
//! ```

pub mod driver;
pub mod error;
pub mod handle;
pub mod registry;

pub use driver::{Driver, DEVICE_IDS, DRIVER_NAME};
pub use error::{HostError, Result};
pub use handle::KnobHandle;
pub use registry::{available_buses, open_bus, open_knob, parse_bus_params, BusInfo, BusParams};

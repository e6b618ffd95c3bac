//! CLI command implementations
//!
//! Every command except `list-buses` opens a bus, probes it through the
//! driver and works on the resulting attribute tree.

pub mod attr;
mod list;

pub use list::list_buses;

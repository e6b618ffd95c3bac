//! Driver registration
//!
//! Bus managers announce devices by id. The driver accepts ids from
//! [`DEVICE_IDS`] and maps "device attached" to probe and "device removed"
//! to remove.

use motorknob_core::bus::BoxedBus;
use motorknob_core::lifecycle::Lifecycle;
use motorknob_core::namespace::Namespace;

use crate::error::{HostError, Result};

/// Driver name as registered with the bus manager
pub const DRIVER_NAME: &str = "motorknob-i2c-driver";

/// Device ids this driver binds to
pub const DEVICE_IDS: &[&str] = &["motorknob"];

/// Whether `id` is in the id table
pub fn matches(id: &str) -> bool {
    DEVICE_IDS.contains(&id)
}

/// The motorknob driver
#[derive(Default)]
pub struct Driver {
    lifecycle: Lifecycle,
}

impl Driver {
    /// Create an unbound driver
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a device is bound
    pub fn is_bound(&self) -> bool {
        self.lifecycle.is_attached()
    }

    /// Device attached: accept it as the knob and publish its attributes
    pub fn probe(&mut self, ns: &mut dyn Namespace, id: &str, bus: BoxedBus) -> Result<()> {
        if !matches(id) {
            return Err(HostError::NoMatchingDevice(id.to_string()));
        }

        log::info!("{}: {} client probed", DRIVER_NAME, id);
        self.lifecycle.attach(ns, bus).map_err(|e| {
            log::error!("{}: probe of {} failed: {}", DRIVER_NAME, id, e);
            HostError::from(e)
        })
    }

    /// Device removed: tear down the attributes and drop the bus
    pub fn remove(&mut self, ns: &mut dyn Namespace) -> Result<()> {
        log::info!("{}: client removed", DRIVER_NAME);
        Ok(self.lifecycle.detach(ns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motorknob_core::namespace::MemoryNamespace;
    use motorknob_dummy::DummyKnob;

    #[test]
    fn test_id_table() {
        assert!(matches("motorknob"));
        assert!(!matches("motorknob2"));
        assert!(!matches(""));
    }

    #[test]
    fn test_probe_unknown_id() {
        let mut ns = MemoryNamespace::new();
        let mut driver = Driver::new();
        let err = driver
            .probe(&mut ns, "eeprom", Box::new(DummyKnob::new_default()))
            .unwrap_err();
        assert!(matches!(err, HostError::NoMatchingDevice(_)));
        assert!(ns.is_empty());
        assert!(!driver.is_bound());
    }

    #[test]
    fn test_probe_remove() {
        let mut ns = MemoryNamespace::new();
        let mut driver = Driver::new();

        driver
            .probe(&mut ns, "motorknob", Box::new(DummyKnob::new_default()))
            .unwrap();
        assert!(driver.is_bound());
        assert_eq!(ns.entries().len(), 4);

        driver.remove(&mut ns).unwrap();
        assert!(!driver.is_bound());
        assert!(ns.is_empty());
    }

    #[test]
    fn test_failed_probe_reports_errno() {
        let mut ns = MemoryNamespace::new();
        ns.fail_after(2);
        let mut driver = Driver::new();

        let err = driver
            .probe(&mut ns, "motorknob", Box::new(DummyKnob::new_default()))
            .unwrap_err();
        assert_eq!(err.code(), -12);
        assert!(ns.is_empty());
    }
}

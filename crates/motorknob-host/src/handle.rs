//! KnobHandle - a bound knob plus the namespace it is published in

use motorknob_core::bus::BoxedBus;
use motorknob_core::namespace::{Entry, MemoryNamespace};
use motorknob_core::protocol::WORD_LEN;

use crate::driver::Driver;
use crate::error::Result;

/// Path-based access to an attached knob
///
/// The handle owns an in-memory namespace and the driver bound into it.
/// Dropping the handle removes the device.
pub struct KnobHandle {
    ns: MemoryNamespace,
    driver: Driver,
}

impl KnobHandle {
    /// Probe `bus` as device `id` and publish its attributes
    pub fn attach(id: &str, bus: BoxedBus) -> Result<Self> {
        let mut ns = MemoryNamespace::new();
        let mut driver = Driver::new();
        driver.probe(&mut ns, id, bus)?;
        Ok(Self { ns, driver })
    }

    /// Published files, sorted by path
    pub fn entries(&self) -> Vec<Entry> {
        self.ns.entries()
    }

    /// Read the two bytes behind `path`
    pub fn read(&self, path: &str) -> Result<[u8; WORD_LEN]> {
        Ok(self.ns.read(path)?)
    }

    /// Write `buf` to `path`, returning the bytes consumed
    pub fn write(&self, path: &str, buf: &[u8]) -> Result<usize> {
        Ok(self.ns.write(path, buf)?)
    }

    /// Remove the device
    pub fn detach(&mut self) -> Result<()> {
        self.driver.remove(&mut self.ns)
    }

    /// Whether the device is still bound
    pub fn is_attached(&self) -> bool {
        self.driver.is_bound()
    }
}

impl Drop for KnobHandle {
    fn drop(&mut self) {
        if self.driver.is_bound() {
            if let Err(e) = self.driver.remove(&mut self.ns) {
                log::warn!("Failed to remove device on drop: {}", e);
            }
        }
    }
}

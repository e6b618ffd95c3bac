//! Device session
//!
//! A [`DeviceSession`] owns the bus handle bound at attach time. Every
//! attribute node holds a reference to it, and the lifecycle releases it
//! once the tree is gone. After release the session stays allocated for any
//! stray node handles but refuses to touch the bus.

use parking_lot::Mutex;

use crate::bus::{BoxedBus, WordBus};
use crate::error::{Error, Result};
use crate::protocol::Command;

/// Exclusive owner of the live bus handle
///
/// The bus carries one transaction at a time, so the handle sits behind a
/// mutex that is held for the whole of each `read_word`/`write_word`.
pub struct DeviceSession {
    bus: Mutex<Option<BoxedBus>>,
}

impl DeviceSession {
    /// Bind a bus handle into a new session
    pub fn new(bus: BoxedBus) -> Self {
        Self {
            bus: Mutex::new(Some(bus)),
        }
    }

    /// Whether the bus handle is still bound
    pub fn is_active(&self) -> bool {
        self.bus.lock().is_some()
    }

    /// Read one word from the device
    pub fn read_word(&self, command: Command) -> Result<u16> {
        let mut guard = self.bus.lock();
        let bus = guard.as_mut().ok_or(Error::NotAttached)?;

        let word = bus.read_word_data(command.code()).map_err(|e| {
            log::error!("Failed to read word ({}): {}", command, e);
            Error::from(e)
        })?;

        log::trace!("{} -> 0x{:04X}", command, word);
        Ok(word)
    }

    /// Write one word to the device
    pub fn write_word(&self, command: Command, word: u16) -> Result<()> {
        let mut guard = self.bus.lock();
        let bus = guard.as_mut().ok_or(Error::NotAttached)?;

        bus.write_word_data(command.code(), word).map_err(|e| {
            log::error!("Failed to send data ({}): {}", command, e);
            Error::from(e)
        })?;

        log::trace!("{} <- 0x{:04X}", command, word);
        Ok(())
    }

    /// Unbind the bus handle and hand it back
    ///
    /// Returns `None` if the session was already released.
    pub fn release(&self) -> Option<BoxedBus> {
        self.bus.lock().take()
    }
}

impl core::fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceSession")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::MockBus;
    use crate::protocol::Register;
    use crate::TransportError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_read_write_word() {
        let bus = MockBus::new();
        let session = DeviceSession::new(Box::new(bus.clone()));

        session
            .write_word(Command::write(Register::EndPosition), 0xBEEF)
            .unwrap();
        let word = session
            .read_word(Command::read(Register::EndPosition))
            .unwrap();

        assert_eq!(word, 0xBEEF);
        assert_eq!(bus.state.lock().written, vec![(0x81, 0xBEEF)]);
    }

    #[test]
    fn test_transport_error_is_unchanged() {
        let bus = MockBus::new();
        bus.fail_with(-121);
        let session = DeviceSession::new(Box::new(bus.clone()));

        let err = session
            .read_word(Command::read(Register::CurrentPosition))
            .unwrap_err();
        assert_eq!(err, Error::Transport(TransportError::new(-121)));

        let err = session
            .write_word(Command::write(Register::DetentCount), 1)
            .unwrap_err();
        assert_eq!(err.code(), -121);
        assert_eq!(bus.transactions(), 2);
    }

    /// Counts calls that are in flight at the same time
    #[derive(Clone, Default)]
    struct OverlapBus {
        in_flight: Arc<AtomicUsize>,
        overlaps: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl OverlapBus {
        fn enter(&self) {
            if self.in_flight.fetch_add(1, Ordering::SeqCst) != 0 {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_micros(200));
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl WordBus for OverlapBus {
        fn read_word_data(&mut self, _command: u8) -> core::result::Result<u16, TransportError> {
            self.enter();
            Ok(0)
        }

        fn write_word_data(
            &mut self,
            _command: u8,
            _word: u16,
        ) -> core::result::Result<(), TransportError> {
            self.enter();
            Ok(())
        }
    }

    #[test]
    fn test_transactions_are_serialized() {
        let bus = OverlapBus::default();
        let session = Arc::new(DeviceSession::new(Box::new(bus.clone())));

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let session = Arc::clone(&session);
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        if i % 2 == 0 {
                            session
                                .read_word(Command::read(Register::CurrentPosition))
                                .unwrap();
                        } else {
                            session
                                .write_word(Command::write(Register::DetentCount), 24)
                                .unwrap();
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(bus.overlaps.load(Ordering::SeqCst), 0);
        assert_eq!(bus.calls.load(Ordering::SeqCst), 160);
    }

    #[test]
    fn test_released_session_fails_fast() {
        let bus = MockBus::new();
        let session = DeviceSession::new(Box::new(bus.clone()));

        assert!(session.is_active());
        assert!(session.release().is_some());
        assert!(!session.is_active());
        assert!(session.release().is_none());

        let err = session
            .read_word(Command::read(Register::DetentCount))
            .unwrap_err();
        assert_eq!(err, Error::NotAttached);
        assert_eq!(bus.transactions(), 0);
    }
}

//! Bus trait definitions

use crate::error::TransportError;

/// SMBus-style word transport
///
/// Each call is exactly one bus transaction addressed by an 8-bit command
/// code. Implementations are synchronous and do not retry; the caller
/// serializes access (see [`DeviceSession`](crate::session::DeviceSession)).
///
/// ## Example
///
/// ```ignore
/// impl WordBus for MyAdapter {
///     fn read_word_data(&mut self, command: u8) -> Result<u16, TransportError> {
///         self.smbus_read_word(command).map_err(|e| TransportError::new(-e))
///     }
///
///     fn write_word_data(&mut self, command: u8, word: u16) -> Result<(), TransportError> {
///         self.smbus_write_word(command, word).map_err(|e| TransportError::new(-e))
///     }
/// }
/// ```
pub trait WordBus {
    /// Read one 16-bit word for `command`
    fn read_word_data(&mut self, command: u8) -> Result<u16, TransportError>;

    /// Write one 16-bit word for `command`
    fn write_word_data(&mut self, command: u8, word: u16) -> Result<(), TransportError>;
}

impl<T: WordBus + ?Sized> WordBus for Box<T> {
    fn read_word_data(&mut self, command: u8) -> Result<u16, TransportError> {
        (**self).read_word_data(command)
    }

    fn write_word_data(&mut self, command: u8, word: u16) -> Result<(), TransportError> {
        (**self).write_word_data(command, word)
    }
}

/// Boxed transport as held by a device session
pub type BoxedBus = Box<dyn WordBus + Send>;

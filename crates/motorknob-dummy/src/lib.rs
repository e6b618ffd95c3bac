//! motorknob-dummy - In-memory knob emulator for testing
//!
//! This crate provides a dummy bus that emulates the motorknob firmware in
//! memory. It's useful for testing and development without real hardware.
//!
//! The emulator answers the same command bytes as the device: a bare
//! register code reads the register, the code with the write flag set
//! stores the word. Clones share state, so a test can keep one clone while
//! the other is bound into a session.

use std::sync::Arc;

use motorknob_core::bus::WordBus;
use motorknob_core::protocol::{Command, Direction, Register};
use motorknob_core::TransportError;
use parking_lot::Mutex;

/// Linux `EREMOTEIO`, what i2c-dev reports for a NACK
pub const NACK: i32 = -121;

/// Initial register contents
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Start of the travel range
    pub start_position: u16,
    /// End of the travel range
    pub end_position: u16,
    /// Detent count
    pub detents: u16,
    /// Current position
    pub position: u16,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            start_position: 0,
            end_position: 360,
            detents: 24,
            position: 0,
        }
    }
}

#[derive(Debug)]
struct State {
    registers: [u16; 4],
    reads: usize,
    writes: usize,
    /// Fail every transaction with this code while set
    fail_with: Option<i32>,
    /// Writes to the current position register are NACKed like the firmware
    strict: bool,
}

/// Dummy knob
///
/// Emulates the motorknob register file for testing purposes.
#[derive(Debug, Clone)]
pub struct DummyKnob {
    state: Arc<Mutex<State>>,
}

impl DummyKnob {
    /// Create a new dummy knob with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        let mut registers = [0u16; 4];
        registers[usize::from(Register::StartPosition.code())] = config.start_position;
        registers[usize::from(Register::EndPosition.code())] = config.end_position;
        registers[usize::from(Register::DetentCount.code())] = config.detents;
        registers[usize::from(Register::CurrentPosition.code())] = config.position;
        Self {
            state: Arc::new(Mutex::new(State {
                registers,
                reads: 0,
                writes: 0,
                fail_with: None,
                strict: false,
            })),
        }
    }

    /// Create a new dummy knob with default configuration
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Raw register word
    pub fn register(&self, register: Register) -> u16 {
        self.state.lock().registers[usize::from(register.code())]
    }

    /// Simulate the user turning the knob
    pub fn turn_to(&self, position: u16) {
        self.state.lock().registers[usize::from(Register::CurrentPosition.code())] = position;
    }

    /// Fail every following transaction with `code` (`None` to recover)
    pub fn set_failure(&self, code: Option<i32>) {
        self.state.lock().fail_with = code;
    }

    /// NACK writes to the current position register
    pub fn set_strict(&self, strict: bool) {
        self.state.lock().strict = strict;
    }

    /// Number of read transactions seen
    pub fn reads(&self) -> usize {
        self.state.lock().reads
    }

    /// Number of write transactions seen
    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }

    /// Total transactions seen
    pub fn transactions(&self) -> usize {
        let state = self.state.lock();
        state.reads + state.writes
    }
}

impl Default for DummyKnob {
    fn default() -> Self {
        Self::new_default()
    }
}

impl WordBus for DummyKnob {
    fn read_word_data(&mut self, command: u8) -> Result<u16, TransportError> {
        let mut state = self.state.lock();
        state.reads += 1;

        if let Some(code) = state.fail_with {
            return Err(TransportError::new(code));
        }

        match Command::from_code(command) {
            Some(Command {
                register,
                direction: Direction::Read,
            }) => {
                let word = state.registers[usize::from(register.code())];
                log::trace!("dummy: read {} = 0x{:04X}", register, word);
                Ok(word)
            }
            _ => {
                log::debug!("dummy: NACK read for command 0x{:02X}", command);
                Err(TransportError::new(NACK))
            }
        }
    }

    fn write_word_data(&mut self, command: u8, word: u16) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.writes += 1;

        if let Some(code) = state.fail_with {
            return Err(TransportError::new(code));
        }

        match Command::from_code(command) {
            Some(Command {
                register,
                direction: Direction::Write,
            }) if !(state.strict && register == Register::CurrentPosition) => {
                log::trace!("dummy: write {} = 0x{:04X}", register, word);
                state.registers[usize::from(register.code())] = word;
                Ok(())
            }
            _ => {
                log::debug!("dummy: NACK write for command 0x{:02X}", command);
                Err(TransportError::new(NACK))
            }
        }
    }
}

//! Register and command types

use core::fmt;

use super::registers::{
    DATA_CURRENT_POS, DATA_DETENTS, DATA_END_POS, DATA_START_POS, REGISTER_MASK, WRITE_REQUEST,
};

/// Number of payload bytes in one register word
pub const WORD_LEN: usize = 2;

/// One of the four device registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// Start of the travel range
    StartPosition = DATA_START_POS,
    /// End of the travel range
    EndPosition = DATA_END_POS,
    /// Number of detents
    DetentCount = DATA_DETENTS,
    /// Current position, updated by the device
    CurrentPosition = DATA_CURRENT_POS,
}

impl Register {
    /// All registers in address order
    pub const ALL: [Register; 4] = [
        Register::StartPosition,
        Register::EndPosition,
        Register::DetentCount,
        Register::CurrentPosition,
    ];

    /// Register address on the bus
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up a register by its address
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            DATA_START_POS => Some(Self::StartPosition),
            DATA_END_POS => Some(Self::EndPosition),
            DATA_DETENTS => Some(Self::DetentCount),
            DATA_CURRENT_POS => Some(Self::CurrentPosition),
            _ => None,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartPosition => "start position",
            Self::EndPosition => "end position",
            Self::DetentCount => "detent count",
            Self::CurrentPosition => "current position",
        };
        f.write_str(name)
    }
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Read the register
    Read,
    /// Write the register
    Write,
}

/// A register addressed in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    /// Target register
    pub register: Register,
    /// Transfer direction
    pub direction: Direction,
}

impl Command {
    /// Read command for `register`
    pub const fn read(register: Register) -> Self {
        Self {
            register,
            direction: Direction::Read,
        }
    }

    /// Write command for `register`
    pub const fn write(register: Register) -> Self {
        Self {
            register,
            direction: Direction::Write,
        }
    }

    /// Command byte as sent on the bus
    pub const fn code(self) -> u8 {
        match self.direction {
            Direction::Read => self.register.code(),
            Direction::Write => WRITE_REQUEST | self.register.code(),
        }
    }

    /// Parse a command byte
    ///
    /// Returns `None` for bytes with bits outside the write flag and the
    /// register field, or for unassigned register addresses.
    pub fn from_code(code: u8) -> Option<Self> {
        if code & !(WRITE_REQUEST | REGISTER_MASK) != 0 {
            return None;
        }
        let register = Register::from_code(code & REGISTER_MASK)?;
        let direction = if code & WRITE_REQUEST != 0 {
            Direction::Write
        } else {
            Direction::Read
        };
        Some(Self {
            register,
            direction,
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Read => "read",
            Direction::Write => "write",
        };
        write!(f, "{} {} (0x{:02X})", dir, self.register, self.code())
    }
}

/// Build the write command and word for a register update
///
/// The first payload byte becomes the high byte of the word.
pub fn encode_write(register: Register, payload: [u8; WORD_LEN]) -> (Command, u16) {
    (Command::write(register), u16::from_be_bytes(payload))
}

/// Split a word read from the device into payload bytes
///
/// The low byte comes first, the opposite of [`encode_write`].
pub fn decode_read(word: u16) -> [u8; WORD_LEN] {
    word.to_le_bytes()
}

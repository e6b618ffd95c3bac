//! Motorknob register protocol
//!
//! Pure encoding and decoding of bus commands and register words. Nothing
//! here touches the bus.
//!
//! # Byte order
//!
//! Writes compose the word big-endian (first byte is the high byte) while
//! reads decompose it little-endian (low byte first). A pair written as
//! `[hi, lo]` therefore reads back as `[lo, hi]`. Userspace relies on this
//! pairing.

mod command;
pub mod registers;

pub use command::{decode_read, encode_write, Command, Direction, Register, WORD_LEN};

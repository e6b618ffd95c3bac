//! Motorknob command byte layout
//!
//! A command byte addresses one register. Bits 0-3 select the register,
//! bit 7 marks the transaction as a write. Reads use the bare register code.

// ============================================================================
// Direction
// ============================================================================

/// Write request flag
pub const WRITE_REQUEST: u8 = 0b1000_0000;

/// Bits that carry the register identifier
pub const REGISTER_MASK: u8 = 0b0000_1111;

// ============================================================================
// Registers
// ============================================================================

/// Start of the travel range
pub const DATA_START_POS: u8 = 0x00;
/// End of the travel range
pub const DATA_END_POS: u8 = 0x01;
/// Number of detents between start and end
pub const DATA_DETENTS: u8 = 0x02;
/// Current knob position (device-owned)
pub const DATA_CURRENT_POS: u8 = 0x03;

// ============================================================================
// Write commands
// ============================================================================

/// Write start position
pub const WRITE_START_POS: u8 = WRITE_REQUEST | DATA_START_POS;
/// Write end position
pub const WRITE_END_POS: u8 = WRITE_REQUEST | DATA_END_POS;
/// Write detent count
pub const WRITE_DETENTS: u8 = WRITE_REQUEST | DATA_DETENTS;

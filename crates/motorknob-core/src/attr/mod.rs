//! Attribute tree nodes
//!
//! Each [`Attribute`] binds one [`Node`] to the device session. Reads and
//! writes for every node go through the same two functions,
//! [`read_register`] and [`write_register`], parameterized by the node's
//! register.

mod node;

use std::sync::Arc;

pub use node::{Access, Node, NodeInfo, Parent};

use crate::error::{Error, Result};
use crate::protocol::{decode_read, encode_write, Command, Register, WORD_LEN};
use crate::session::DeviceSession;

/// Read a register and return its payload bytes
pub fn read_register(session: &DeviceSession, register: Register) -> Result<[u8; WORD_LEN]> {
    let word = session.read_word(Command::read(register))?;
    Ok(decode_read(word))
}

/// Write the first two bytes of `buf` to a register
///
/// Returns `buf.len()` on success: the whole request counts as consumed even
/// though only the first word is sent.
pub fn write_register(session: &DeviceSession, register: Register, buf: &[u8]) -> Result<usize> {
    let [hi, lo, ..] = *buf else {
        return Err(Error::InvalidArgument {
            needed: WORD_LEN,
            got: buf.len(),
        });
    };

    let (command, word) = encode_write(register, [hi, lo]);
    session.write_word(command, word)?;
    Ok(buf.len())
}

/// A published attribute node
#[derive(Debug, Clone)]
pub struct Attribute {
    node: Node,
    session: Arc<DeviceSession>,
}

impl Attribute {
    /// Bind `node` to a session
    pub fn new(node: Node, session: Arc<DeviceSession>) -> Self {
        Self { node, session }
    }

    /// Node identity
    pub fn node(&self) -> Node {
        self.node
    }

    /// Entry name
    pub fn name(&self) -> &'static str {
        self.node.name()
    }

    /// Access permission
    pub fn access(&self) -> Access {
        self.node.access()
    }

    /// Read the node's register
    pub fn read(&self) -> Result<[u8; WORD_LEN]> {
        read_register(&self.session, self.node.register())
    }

    /// Write the node's register
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        if !self.node.is_writable() {
            return Err(Error::PermissionDenied {
                node: self.node.name(),
            });
        }
        write_register(&self.session, self.node.register(), buf)
    }
}

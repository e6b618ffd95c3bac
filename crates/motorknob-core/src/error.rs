//! Error types for motorknob-core

use thiserror::Error;

/// Kernel-style errno values used by [`Error::code`]
pub mod errno {
    /// No such file or directory
    pub const ENOENT: i32 = 2;
    /// Out of memory
    pub const ENOMEM: i32 = 12;
    /// Permission denied
    pub const EACCES: i32 = 13;
    /// Device or resource busy
    pub const EBUSY: i32 = 16;
    /// File exists
    pub const EEXIST: i32 = 17;
    /// No such device
    pub const ENODEV: i32 = 19;
    /// Invalid argument
    pub const EINVAL: i32 = 22;
}

/// Failure reported by the bus transport
///
/// `code` is whatever the transport returned (a negative errno for Linux
/// SMBus transfers). It is carried through unchanged so callers can tell a
/// NACK from a missing adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bus transfer failed with code {code}")]
pub struct TransportError {
    /// Raw transport return code
    pub code: i32,
}

impl TransportError {
    /// Wrap a raw transport return code
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Core error type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A write supplied fewer bytes than a register word needs
    #[error("invalid argument: expected at least {needed} bytes, got {got}")]
    InvalidArgument {
        /// Minimum number of bytes
        needed: usize,
        /// Number of bytes supplied
        got: usize,
    },

    /// The bus transaction failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The namespace could not create a node during attach
    #[error("out of resources creating {node}")]
    ResourceExhausted {
        /// Name of the group or attribute that failed
        node: &'static str,
    },

    /// Attach was called while a device is bound
    #[error("device already attached")]
    AlreadyAttached,

    /// A register operation or detach was attempted with no device bound
    #[error("device not attached")]
    NotAttached,

    /// Write to a read-only attribute
    #[error("{node} is read-only")]
    PermissionDenied {
        /// Name of the attribute
        node: &'static str,
    },
}

impl Error {
    /// Negative errno-style code, as a byte-stream endpoint would return it
    ///
    /// Transport errors return the transport's own code untouched.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => -errno::EINVAL,
            Self::Transport(e) => e.code,
            Self::ResourceExhausted { .. } => -errno::ENOMEM,
            Self::AlreadyAttached => -errno::EBUSY,
            Self::NotAttached => -errno::ENODEV,
            Self::PermissionDenied { .. } => -errno::EACCES,
        }
    }
}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;

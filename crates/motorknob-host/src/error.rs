//! Error types for motorknob-host

use motorknob_core::error::errno;
use motorknob_core::namespace::NamespaceError;
use thiserror::Error;

/// Host-side errors
#[derive(Debug, Error)]
pub enum HostError {
    /// Probe for a device id that is not in the id table
    #[error("no driver for device id '{0}'")]
    NoMatchingDevice(String),

    /// Attach, detach or a register operation failed
    #[error(transparent)]
    Device(#[from] motorknob_core::Error),

    /// Namespace lookup or access failed
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl HostError {
    /// Negative errno-style code
    pub fn code(&self) -> i32 {
        match self {
            Self::NoMatchingDevice(_) => -errno::ENODEV,
            Self::Device(e) => e.code(),
            Self::Namespace(NamespaceError::Device(e)) => e.code(),
            Self::Namespace(NamespaceError::PermissionDenied(_)) => -errno::EACCES,
            Self::Namespace(NamespaceError::OutOfMemory) => -errno::ENOMEM,
            Self::Namespace(NamespaceError::Exists(_)) => -errno::EEXIST,
            Self::Namespace(_) => -errno::ENOENT,
        }
    }
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;
    use motorknob_core::namespace::GroupId;

    #[test]
    fn test_namespace_codes() {
        let code = |e: NamespaceError| HostError::from(e).code();

        assert_eq!(code(NamespaceError::Exists("/motorknob".into())), -17);
        assert_eq!(code(NamespaceError::NotFound("/motorknob/x".into())), -2);
        assert_eq!(code(NamespaceError::NoSuchGroup(GroupId(3))), -2);
        assert_eq!(code(NamespaceError::PermissionDenied("/motorknob/position".into())), -13);
        assert_eq!(code(NamespaceError::OutOfMemory), -12);
        assert_eq!(
            code(NamespaceError::Device(motorknob_core::Error::NotAttached)),
            -19
        );
    }

    #[test]
    fn test_device_codes() {
        assert_eq!(HostError::NoMatchingDevice("eeprom".into()).code(), -19);
        assert_eq!(HostError::from(motorknob_core::Error::AlreadyAttached).code(), -16);
    }
}

//! Host namespace interface
//!
//! The namespace is the hierarchy that makes attribute nodes visible to
//! other processes (sysfs on Linux). The core only creates and removes
//! entries through [`Namespace`]; lookups and permission checks on external
//! access belong to the host.
//!
//! [`MemoryNamespace`] is an in-process host used by the CLI and tests.

mod memory;

use thiserror::Error;

use crate::attr::Attribute;

pub use memory::{Entry, MemoryNamespace};

/// Handle to a group created in a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

/// Namespace errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// The host could not allocate the entry
    #[error("out of memory")]
    OutOfMemory,

    /// An entry with the same name already exists
    #[error("{0} already exists")]
    Exists(String),

    /// The parent group does not exist
    #[error("no such group: {0:?}")]
    NoSuchGroup(GroupId),

    /// Path lookup failed
    #[error("{0}: no such file or directory")]
    NotFound(String),

    /// The entry does not grant the requested access
    #[error("{0}: permission denied")]
    PermissionDenied(String),

    /// The node's own handler failed
    #[error(transparent)]
    Device(#[from] crate::error::Error),
}

/// Operations the lifecycle needs from the host hierarchy
///
/// Creation may fail; removal is assumed to succeed once the matching
/// creation did.
pub trait Namespace {
    /// Create a group, at the top level when `parent` is `None`
    fn create_group(
        &mut self,
        name: &str,
        parent: Option<GroupId>,
    ) -> Result<GroupId, NamespaceError>;

    /// Publish an attribute in `group`
    fn create_file(&mut self, group: GroupId, attr: Attribute) -> Result<(), NamespaceError>;

    /// Remove the attribute `name` from `group`
    fn remove_file(&mut self, group: GroupId, name: &str);

    /// Drop a group and anything still inside it
    fn release_group(&mut self, group: GroupId);
}

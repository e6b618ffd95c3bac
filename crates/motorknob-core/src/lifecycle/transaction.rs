//! Scoped namespace transaction with automatic rollback

use crate::attr::Attribute;
use crate::error::{Error, Result};
use crate::namespace::{GroupId, Namespace};

enum Undo {
    ReleaseGroup(GroupId),
    RemoveFile(GroupId, &'static str),
}

/// Records every entry it creates and removes them again on drop
///
/// Undo runs in exact reverse creation order. [`commit`](Self::commit)
/// forgets the undo list and leaves the entries in place.
pub(crate) struct Transaction<'a> {
    ns: &'a mut dyn Namespace,
    undo: Vec<Undo>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(ns: &'a mut dyn Namespace) -> Self {
        Self {
            ns,
            undo: Vec::new(),
        }
    }

    pub(crate) fn create_group(
        &mut self,
        name: &'static str,
        parent: Option<GroupId>,
    ) -> Result<GroupId> {
        let id = self.ns.create_group(name, parent).map_err(|e| {
            log::error!("Error creating group {}: {}", name, e);
            Error::ResourceExhausted { node: name }
        })?;
        self.undo.push(Undo::ReleaseGroup(id));
        Ok(id)
    }

    pub(crate) fn create_file(&mut self, group: GroupId, attr: Attribute) -> Result<()> {
        let name = attr.name();
        self.ns.create_file(group, attr).map_err(|e| {
            log::error!("Error creating attribute {}: {}", name, e);
            Error::ResourceExhausted { node: name }
        })?;
        self.undo.push(Undo::RemoveFile(group, name));
        Ok(())
    }

    pub(crate) fn commit(mut self) {
        self.undo.clear();
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.undo.is_empty() {
            log::debug!("Rolling back {} namespace entries", self.undo.len());
        }
        while let Some(step) = self.undo.pop() {
            match step {
                Undo::RemoveFile(group, name) => self.ns.remove_file(group, name),
                Undo::ReleaseGroup(group) => self.ns.release_group(group),
            }
        }
    }
}

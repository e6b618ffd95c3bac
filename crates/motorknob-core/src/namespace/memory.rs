//! In-memory namespace

use std::collections::BTreeMap;

use super::{GroupId, Namespace, NamespaceError};
use crate::attr::{Access, Attribute};
use crate::protocol::WORD_LEN;

#[derive(Debug)]
struct Group {
    name: String,
    parent: Option<GroupId>,
    files: BTreeMap<&'static str, Attribute>,
}

/// A published file as seen from outside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path, e.g. `/motorknob/position`
    pub path: String,
    /// Permission bits
    pub mode: u16,
}

/// Namespace kept entirely in process memory
///
/// Enforces entry permissions on [`read`](Self::read) and
/// [`write`](Self::write), and can be told to fail a later creation to
/// exercise attach rollback.
#[derive(Debug, Default)]
pub struct MemoryNamespace {
    groups: BTreeMap<GroupId, Group>,
    next_id: u32,
    /// Creations left before the injected failure
    fail_after: Option<usize>,
}

impl MemoryNamespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `n` more creations succeed, then fail the next one
    ///
    /// The failure fires once.
    pub fn fail_after(&mut self, n: usize) {
        self.fail_after = Some(n);
    }

    /// Whether nothing is published
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Absolute paths of all groups, sorted
    pub fn group_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.groups.keys().map(|&id| self.group_path(id)).collect();
        paths.sort();
        paths
    }

    /// All published files, sorted by path
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .groups
            .iter()
            .flat_map(|(&id, group)| {
                let dir = self.group_path(id);
                group.files.values().map(move |attr| Entry {
                    path: format!("{}/{}", dir, attr.name()),
                    mode: attr.access().mode(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    /// Look up the attribute at `path`
    pub fn lookup(&self, path: &str) -> Result<&Attribute, NamespaceError> {
        let not_found = || NamespaceError::NotFound(path.to_string());

        let mut parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        let file = parts.pop().ok_or_else(not_found)?;

        let mut current = None;
        for name in parts {
            current = Some(self.find_group(name, current).ok_or_else(not_found)?);
        }
        let group = current.ok_or_else(not_found)?;

        self.groups
            .get(&group)
            .and_then(|g| g.files.get(file))
            .ok_or_else(not_found)
    }

    /// Read the attribute at `path`
    pub fn read(&self, path: &str) -> Result<[u8; WORD_LEN], NamespaceError> {
        let attr = self.lookup(path)?;
        if !attr.access().contains(Access::READ) {
            return Err(NamespaceError::PermissionDenied(path.to_string()));
        }
        Ok(attr.read()?)
    }

    /// Write `buf` to the attribute at `path`
    ///
    /// Entries without write permission are rejected here and never reach
    /// the node.
    pub fn write(&self, path: &str, buf: &[u8]) -> Result<usize, NamespaceError> {
        let attr = self.lookup(path)?;
        if !attr.access().contains(Access::WRITE) {
            return Err(NamespaceError::PermissionDenied(path.to_string()));
        }
        Ok(attr.write(buf)?)
    }

    fn find_group(&self, name: &str, parent: Option<GroupId>) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|(_, g)| g.name == name && g.parent == parent)
            .map(|(&id, _)| id)
    }

    fn group_path(&self, id: GroupId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(group) = current.and_then(|id| self.groups.get(&id)) {
            names.push(group.name.as_str());
            current = group.parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn check_fault(&mut self) -> Result<(), NamespaceError> {
        match self.fail_after {
            Some(0) => {
                self.fail_after = None;
                Err(NamespaceError::OutOfMemory)
            }
            Some(ref mut n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn is_descendant(&self, id: GroupId, ancestor: GroupId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.groups.get(&c).and_then(|g| g.parent);
        }
        false
    }
}

impl Namespace for MemoryNamespace {
    fn create_group(
        &mut self,
        name: &str,
        parent: Option<GroupId>,
    ) -> Result<GroupId, NamespaceError> {
        if let Some(p) = parent {
            if !self.groups.contains_key(&p) {
                return Err(NamespaceError::NoSuchGroup(p));
            }
        }
        if self.find_group(name, parent).is_some() {
            let path = match parent {
                Some(p) => format!("{}/{}", self.group_path(p), name),
                None => format!("/{}", name),
            };
            return Err(NamespaceError::Exists(path));
        }
        self.check_fault()?;

        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.insert(
            id,
            Group {
                name: name.to_string(),
                parent,
                files: BTreeMap::new(),
            },
        );
        log::trace!("namespace: created group {}", self.group_path(id));
        Ok(id)
    }

    fn create_file(&mut self, group: GroupId, attr: Attribute) -> Result<(), NamespaceError> {
        let exists = match self.groups.get(&group) {
            Some(g) => g.files.contains_key(attr.name()),
            None => return Err(NamespaceError::NoSuchGroup(group)),
        };
        if exists {
            return Err(NamespaceError::Exists(format!(
                "{}/{}",
                self.group_path(group),
                attr.name()
            )));
        }
        self.check_fault()?;

        if let Some(g) = self.groups.get_mut(&group) {
            log::trace!("namespace: created file {}", attr.name());
            g.files.insert(attr.name(), attr);
        }
        Ok(())
    }

    fn remove_file(&mut self, group: GroupId, name: &str) {
        let removed = self
            .groups
            .get_mut(&group)
            .and_then(|g| g.files.remove(name));
        if removed.is_none() {
            log::debug!("namespace: remove of missing file {} ignored", name);
        }
    }

    fn release_group(&mut self, group: GroupId) {
        let doomed: Vec<GroupId> = self
            .groups
            .keys()
            .copied()
            .filter(|&id| self.is_descendant(id, group))
            .collect();
        for id in doomed {
            self.groups.remove(&id);
        }
    }
}

//! Attach/detach lifecycle
//!
//! [`Lifecycle`] is a two-state machine (Detached, Attached). Attach binds
//! the bus into a [`DeviceSession`] and publishes the attribute tree; it is
//! all-or-nothing. Detach tears the tree down and releases the session.

mod transaction;

use std::sync::Arc;

use crate::attr::{Attribute, Node, Parent};
use crate::bus::BoxedBus;
use crate::error::{Error, Result};
use crate::namespace::{GroupId, Namespace};
use crate::session::DeviceSession;

use transaction::Transaction;

/// Name of the root group
pub const ROOT_GROUP: &str = "motorknob";

/// Name of the profile subgroup
pub const PROFILE_GROUP: &str = "profile";

struct Binding {
    session: Arc<DeviceSession>,
    root: GroupId,
    profile: GroupId,
}

impl Binding {
    fn group_for(&self, node: Node) -> GroupId {
        match node.parent() {
            Parent::Root => self.root,
            Parent::Profile => self.profile,
        }
    }
}

enum State {
    Detached,
    Attached(Binding),
}

/// Lifecycle manager for one knob
pub struct Lifecycle {
    state: State,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    /// Start detached
    pub fn new() -> Self {
        Self {
            state: State::Detached,
        }
    }

    /// Whether a device is bound
    pub fn is_attached(&self) -> bool {
        matches!(self.state, State::Attached(_))
    }

    /// The active session, if attached
    pub fn session(&self) -> Option<&Arc<DeviceSession>> {
        match &self.state {
            State::Attached(binding) => Some(&binding.session),
            State::Detached => None,
        }
    }

    /// Bind `bus` and publish the attribute tree into `ns`
    ///
    /// Creation order: root group, profile group, `detents`,
    /// `start_position`, `end_position`, `position`. If any step fails,
    /// everything created so far is removed in reverse order, the session is
    /// released and the lifecycle stays detached.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyAttached`] if a device is already bound; nothing is
    ///   touched and `bus` is dropped
    /// - [`Error::ResourceExhausted`] if the namespace refuses an entry
    pub fn attach(&mut self, ns: &mut dyn Namespace, bus: BoxedBus) -> Result<()> {
        if self.is_attached() {
            log::warn!("Attach rejected: device already attached");
            return Err(Error::AlreadyAttached);
        }

        let session = Arc::new(DeviceSession::new(bus));

        let (root, profile) = match build_tree(ns, &session) {
            Ok(groups) => groups,
            Err(e) => {
                session.release();
                return Err(e);
            }
        };

        log::info!("Created /{}/*", ROOT_GROUP);
        self.state = State::Attached(Binding {
            session,
            root,
            profile,
        });
        Ok(())
    }

    /// Remove the attribute tree from `ns` and release the session
    ///
    /// Attributes go first (profile children, then `position`), then the
    /// profile group, the root group and finally the bus handle.
    ///
    /// # Errors
    ///
    /// [`Error::NotAttached`] if no device is bound. Detaching a bound
    /// device always succeeds.
    pub fn detach(&mut self, ns: &mut dyn Namespace) -> Result<()> {
        let binding = match std::mem::replace(&mut self.state, State::Detached) {
            State::Attached(binding) => binding,
            State::Detached => return Err(Error::NotAttached),
        };

        log::info!("Deleting /{}/* entries", ROOT_GROUP);
        for node in Node::ALL {
            ns.remove_file(binding.group_for(node), node.name());
        }
        ns.release_group(binding.profile);
        ns.release_group(binding.root);

        binding.session.release();
        Ok(())
    }
}

fn build_tree(ns: &mut dyn Namespace, session: &Arc<DeviceSession>) -> Result<(GroupId, GroupId)> {
    let mut tx = Transaction::new(ns);

    let root = tx.create_group(ROOT_GROUP, None)?;
    let profile = tx.create_group(PROFILE_GROUP, Some(root))?;

    for node in Node::ALL {
        let group = match node.parent() {
            Parent::Root => root,
            Parent::Profile => profile,
        };
        tx.create_file(group, Attribute::new(node, Arc::clone(session)))?;
    }

    tx.commit();
    Ok((root, profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::mock::MockBus;
    use crate::namespace::{GroupId, MemoryNamespace, NamespaceError};

    const PATHS: [&str; 4] = [
        "/motorknob/position",
        "/motorknob/profile/detents",
        "/motorknob/profile/end_position",
        "/motorknob/profile/start_position",
    ];

    #[test]
    fn test_attach_builds_tree() {
        let mut ns = MemoryNamespace::new();
        let mut knob = Lifecycle::new();

        knob.attach(&mut ns, Box::new(MockBus::new())).unwrap();

        assert!(knob.is_attached());
        let paths: Vec<String> = ns.entries().into_iter().map(|e| e.path).collect();
        assert_eq!(paths, PATHS);
        assert_eq!(
            ns.group_paths(),
            vec!["/motorknob".to_string(), "/motorknob/profile".to_string()]
        );
    }

    #[test]
    fn test_attach_rolls_back_at_every_step() {
        // Six creations: two groups and four attributes
        for step in 0..6 {
            let bus = MockBus::new();
            let mut ns = MemoryNamespace::new();
            let mut knob = Lifecycle::new();

            ns.fail_after(step);
            let err = knob.attach(&mut ns, Box::new(bus.clone())).unwrap_err();

            assert!(
                matches!(err, Error::ResourceExhausted { .. }),
                "step {}: {:?}",
                step,
                err
            );
            assert!(ns.is_empty(), "step {} left {:?}", step, ns.group_paths());
            assert!(ns.entries().is_empty());
            assert!(!knob.is_attached());
            assert_eq!(bus.transactions(), 0);
        }
    }

    #[test]
    fn test_rollback_names_failing_node() {
        let expected = [
            "motorknob",
            "profile",
            "detents",
            "start_position",
            "end_position",
            "position",
        ];
        for (step, &name) in expected.iter().enumerate() {
            let mut ns = MemoryNamespace::new();
            ns.fail_after(step);
            let err = Lifecycle::new()
                .attach(&mut ns, Box::new(MockBus::new()))
                .unwrap_err();
            assert_eq!(err, Error::ResourceExhausted { node: name });
        }
    }

    #[test]
    fn test_rollback_preserves_unrelated_entries() {
        let mut ns = MemoryNamespace::new();
        ns.create_group("other", None).unwrap();
        let before = (ns.group_paths(), ns.entries());

        ns.fail_after(4);
        let mut knob = Lifecycle::new();
        assert!(knob.attach(&mut ns, Box::new(MockBus::new())).is_err());

        assert_eq!((ns.group_paths(), ns.entries()), before);
    }

    /// Records the order of namespace calls
    #[derive(Default)]
    struct Recorder {
        inner: MemoryNamespace,
        log: Vec<String>,
    }

    impl Namespace for Recorder {
        fn create_group(
            &mut self,
            name: &str,
            parent: Option<GroupId>,
        ) -> core::result::Result<GroupId, NamespaceError> {
            self.log.push(format!("create {}", name));
            self.inner.create_group(name, parent)
        }

        fn create_file(
            &mut self,
            group: GroupId,
            attr: Attribute,
        ) -> core::result::Result<(), NamespaceError> {
            self.log.push(format!("create {}", attr.name()));
            self.inner.create_file(group, attr)
        }

        fn remove_file(&mut self, group: GroupId, name: &str) {
            self.log.push(format!("remove {}", name));
            self.inner.remove_file(group, name)
        }

        fn release_group(&mut self, group: GroupId) {
            self.log.push(format!("release {:?}", group));
            self.inner.release_group(group)
        }
    }

    #[test]
    fn test_rollback_order_is_reverse_of_creation() {
        let mut ns = Recorder::default();
        ns.inner.fail_after(4);

        let err = Lifecycle::new()
            .attach(&mut ns, Box::new(MockBus::new()))
            .unwrap_err();
        assert_eq!(err, Error::ResourceExhausted { node: "end_position" });

        assert_eq!(
            ns.log,
            vec![
                "create motorknob",
                "create profile",
                "create detents",
                "create start_position",
                "create end_position",
                "remove start_position",
                "remove detents",
                "release GroupId(1)",
                "release GroupId(0)",
            ]
        );
    }

    #[test]
    fn test_detach_order() {
        let mut ns = Recorder::default();
        let mut knob = Lifecycle::new();
        knob.attach(&mut ns, Box::new(MockBus::new())).unwrap();
        ns.log.clear();

        knob.detach(&mut ns).unwrap();
        assert_eq!(
            ns.log,
            vec![
                "remove detents",
                "remove start_position",
                "remove end_position",
                "remove position",
                "release GroupId(1)",
                "release GroupId(0)",
            ]
        );
        assert!(ns.inner.is_empty());
    }

    #[test]
    fn test_second_attach_rejected() {
        let mut ns = MemoryNamespace::new();
        let mut knob = Lifecycle::new();
        let first = MockBus::new();
        let second = MockBus::new();

        knob.attach(&mut ns, Box::new(first.clone())).unwrap();
        let before = ns.entries();

        let err = knob.attach(&mut ns, Box::new(second.clone())).unwrap_err();
        assert_eq!(err, Error::AlreadyAttached);
        assert_eq!(ns.entries(), before);

        // The first session still serves reads
        ns.write("/motorknob/profile/detents", &[0, 24]).unwrap();
        assert_eq!(first.state.lock().writes, 1);
        assert_eq!(second.transactions(), 0);
    }

    #[test]
    fn test_detach_releases_everything() {
        let bus = MockBus::new();
        let mut ns = MemoryNamespace::new();
        let mut knob = Lifecycle::new();
        knob.attach(&mut ns, Box::new(bus.clone())).unwrap();

        let retained = ns.lookup("/motorknob/profile/detents").unwrap().clone();
        let session = Arc::clone(knob.session().unwrap());

        knob.detach(&mut ns).unwrap();

        assert!(!knob.is_attached());
        assert!(ns.is_empty());
        for path in PATHS {
            assert!(matches!(ns.read(path), Err(NamespaceError::NotFound(_))));
        }
        assert!(!session.is_active());
        assert_eq!(retained.read().unwrap_err(), Error::NotAttached);
        assert_eq!(retained.write(&[1, 2]).unwrap_err(), Error::NotAttached);
        assert_eq!(bus.transactions(), 0);
    }

    #[test]
    fn test_detach_when_detached() {
        let mut ns = MemoryNamespace::new();
        assert_eq!(
            Lifecycle::new().detach(&mut ns).unwrap_err(),
            Error::NotAttached
        );
    }

    #[test]
    fn test_reattach_after_detach() {
        let mut ns = MemoryNamespace::new();
        let mut knob = Lifecycle::new();

        knob.attach(&mut ns, Box::new(MockBus::new())).unwrap();
        knob.detach(&mut ns).unwrap();

        let bus = MockBus::new();
        knob.attach(&mut ns, Box::new(bus.clone())).unwrap();
        ns.write("/motorknob/profile/start_position", &[0xAA, 0xBB])
            .unwrap();
        assert_eq!(
            ns.read("/motorknob/profile/start_position").unwrap(),
            [0xBB, 0xAA]
        );
        assert_eq!(bus.transactions(), 2);
    }

    #[test]
    fn test_failed_attach_releases_session() {
        let bus = MockBus::new();
        let mut ns = MemoryNamespace::new();
        ns.fail_after(5);

        let mut knob = Lifecycle::new();
        assert!(knob.attach(&mut ns, Box::new(bus)).is_err());
        assert!(knob.session().is_none());

        // A clean retry succeeds
        knob.attach(&mut ns, Box::new(MockBus::new())).unwrap();
        assert_eq!(ns.entries().len(), 4);
    }
}

//! Attribute node table

use bitflags::bitflags;

use crate::protocol::Register;

bitflags! {
    /// Access granted to an attribute node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        /// Node can be read
        const READ  = 1 << 0;
        /// Node can be written
        const WRITE = 1 << 1;

        /// Shorthand for read-write nodes
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl Access {
    /// File mode the node is published with (owner and group only)
    pub fn mode(self) -> u16 {
        let mut bits = 0;
        if self.contains(Access::READ) {
            bits |= 0o4;
        }
        if self.contains(Access::WRITE) {
            bits |= 0o2;
        }
        (bits << 6) | (bits << 3)
    }
}

/// Group a node lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// The `motorknob` root group
    Root,
    /// The `profile` subgroup
    Profile,
}

/// Static description of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    /// Entry name within its group
    pub name: &'static str,
    /// Register the node is bound to
    pub register: Register,
    /// Access permission
    pub access: Access,
    /// Containing group
    pub parent: Parent,
}

const DETENTS: NodeInfo = NodeInfo {
    name: "detents",
    register: Register::DetentCount,
    access: Access::READ_WRITE,
    parent: Parent::Profile,
};

const START_POSITION: NodeInfo = NodeInfo {
    name: "start_position",
    register: Register::StartPosition,
    access: Access::READ_WRITE,
    parent: Parent::Profile,
};

const END_POSITION: NodeInfo = NodeInfo {
    name: "end_position",
    register: Register::EndPosition,
    access: Access::READ_WRITE,
    parent: Parent::Profile,
};

const POSITION: NodeInfo = NodeInfo {
    name: "position",
    register: Register::CurrentPosition,
    access: Access::READ,
    parent: Parent::Root,
};

/// Attribute nodes exposed by the knob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    /// `profile/detents`
    Detents,
    /// `profile/start_position`
    StartPosition,
    /// `profile/end_position`
    EndPosition,
    /// `position`
    Position,
}

impl Node {
    /// All nodes, in the order they are registered on attach
    pub const ALL: [Node; 4] = [
        Node::Detents,
        Node::StartPosition,
        Node::EndPosition,
        Node::Position,
    ];

    /// Static description of this node
    pub const fn info(self) -> &'static NodeInfo {
        match self {
            Self::Detents => &DETENTS,
            Self::StartPosition => &START_POSITION,
            Self::EndPosition => &END_POSITION,
            Self::Position => &POSITION,
        }
    }

    /// Entry name
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// Bound register
    pub const fn register(self) -> Register {
        self.info().register
    }

    /// Access permission
    pub const fn access(self) -> Access {
        self.info().access
    }

    /// Containing group
    pub const fn parent(self) -> Parent {
        self.info().parent
    }

    /// Whether the node has a write handler
    pub fn is_writable(self) -> bool {
        self.access().contains(Access::WRITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(Access::READ_WRITE.mode(), 0o660);
        assert_eq!(Access::READ.mode(), 0o440);
        assert_eq!(Node::Position.access().mode(), 0o440);
        assert_eq!(Node::Detents.access().mode(), 0o660);
    }

    #[test]
    fn test_node_table() {
        assert_eq!(Node::Position.register(), Register::CurrentPosition);
        assert_eq!(Node::Position.parent(), Parent::Root);
        assert!(!Node::Position.is_writable());

        for node in [Node::Detents, Node::StartPosition, Node::EndPosition] {
            assert_eq!(node.parent(), Parent::Profile);
            assert!(node.is_writable());
        }

        // Every register is reachable through exactly one node
        for reg in Register::ALL {
            assert_eq!(Node::ALL.iter().filter(|n| n.register() == reg).count(), 1);
        }
    }
}

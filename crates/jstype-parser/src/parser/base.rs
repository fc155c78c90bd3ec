//! Node handles.

use serde::Serialize;

/// Index of a node in a `NodeArena`. `NodeIndex::NONE` marks an absent
/// optional child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != NodeIndex::NONE
    }

    /// `Some(self)` unless this is `NONE`.
    #[inline]
    pub fn into_option(self) -> Option<NodeIndex> {
        if self.is_none() { None } else { Some(self) }
    }
}

/// An ordered list of child nodes.
pub type NodeList = Vec<NodeIndex>;

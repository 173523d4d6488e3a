pub mod aggregate;
pub mod arena;

use std::fmt;

use self::arena::{FileTree, NodeId};

/// What a node stands for. Rendering asks this instead of dispatching on
/// concrete node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
    /// Pseudo-directory holding the direct files of a directory that also
    /// has subdirectories.
    LooseFiles,
}

impl NodeKind {
    /// Group tiles are painted flat; only non-group tiles get cushions.
    pub fn is_group(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::LooseFiles)
    }
}

/// Read-only view of a size-annotated hierarchy.
///
/// The engine trusts `weight` for every node it lays out and never re-derives
/// a parent's weight from its children. Child order is irrelevant; the engine
/// sorts by weight and keeps input order for ties.
pub trait WeightedTree: Sync {
    type Node: Copy + Eq + fmt::Debug + Send + Sync;

    fn weight(&self, node: Self::Node) -> u64;

    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    fn kind(&self, node: Self::Node) -> NodeKind;

    fn is_leaf(&self, node: Self::Node) -> bool {
        !self.kind(node).is_group()
    }
}

impl WeightedTree for FileTree {
    type Node = NodeId;

    fn weight(&self, node: NodeId) -> u64 {
        self.get(node).size
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        FileTree::children(self, node)
    }

    fn kind(&self, node: NodeId) -> NodeKind {
        self.get(node).kind
    }
}

use std::collections::HashMap;

use compact_str::CompactString;

use super::NodeKind;

/// Index into the arena `Vec<FileNode>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the file tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name (not full path)
    pub name: CompactString,
    /// Size in bytes. For files: actual size. For groups: aggregated sum of children.
    pub size: u64,
    pub kind: NodeKind,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// First child node index (None for files / empty dirs)
    pub first_child: Option<NodeId>,
    /// Last child, so appending keeps insertion order in O(1)
    pub last_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
}

/// Weighted file hierarchy stored as a flat arena of nodes.
///
/// This is a plain in-memory model for feeding the layout engine; it does not
/// know how its contents were gathered.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<FileNode>,
    /// Root node index
    pub root: NodeId,
    /// (parent, name) → child, used by `insert_path`
    by_name: HashMap<(NodeId, CompactString), NodeId>,
}

impl FileTree {
    /// Create a tree holding only an empty root directory.
    pub fn new(root_name: &str) -> Self {
        let root_node = FileNode {
            name: CompactString::new(root_name),
            size: 0,
            kind: NodeKind::Directory,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        };

        FileTree {
            nodes: vec![root_node],
            root: NodeId(0),
            by_name: HashMap::new(),
        }
    }

    /// Append a child under `parent`. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, name: &str, size: u64, kind: NodeKind) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        let name = CompactString::new(name);
        self.nodes.push(FileNode {
            name: name.clone(),
            size,
            kind,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
        });
        self.link_last(parent, new_id);
        self.by_name.insert((parent, name), new_id);
        new_id
    }

    pub fn add_dir(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.add_child(parent, name, 0, NodeKind::Directory)
    }

    pub fn add_file(&mut self, parent: NodeId, name: &str, size: u64) -> NodeId {
        self.add_child(parent, name, size, NodeKind::File)
    }

    /// Insert a file at a `/`-separated path relative to the root, creating
    /// missing intermediate directories. Iterative, so path depth is unbounded.
    pub fn insert_path(&mut self, path: &str, size: u64) -> NodeId {
        let mut components = path.split('/').filter(|c| !c.is_empty()).peekable();
        let mut current = self.root;

        while let Some(component) = components.next() {
            let is_last = components.peek().is_none();
            let key = (current, CompactString::new(component));
            current = match self.by_name.get(&key) {
                Some(&existing) => {
                    if is_last {
                        self.nodes[existing.index()].size = size;
                    }
                    existing
                }
                None if is_last => self.add_file(current, component, size),
                None => self.add_dir(current, component),
            };
        }

        current
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut FileNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node, in insertion order.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Replace `parent`'s child list with `children`, in that order.
    pub(crate) fn relink(&mut self, parent: NodeId, children: &[NodeId]) {
        let p = parent.index();
        self.nodes[p].first_child = None;
        self.nodes[p].last_child = None;
        for &child in children {
            let node = &mut self.nodes[child.index()];
            node.next_sibling = None;
            let old_parent = node.parent.replace(parent);
            if let Some(old) = old_parent.filter(|&old| old != parent) {
                let name = node.name.clone();
                self.by_name.remove(&(old, name.clone()));
                self.by_name.insert((parent, name), child);
            }
            self.link_last(parent, child);
        }
    }

    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes[parent.index()].last_child {
            Some(last) => self.nodes[last.index()].next_sibling = Some(child),
            None => self.nodes[parent.index()].first_child = Some(child),
        }
        self.nodes[parent.index()].last_child = Some(child);
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a FileTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

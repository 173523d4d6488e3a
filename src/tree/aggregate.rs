use compact_str::CompactString;

use super::arena::{FileTree, NodeId};
use super::NodeKind;

/// Name given to the loose-files pseudo-directory.
pub const LOOSE_FILES_NAME: &str = "<Files>";

/// Compute aggregated sizes for all group nodes (bottom-up).
/// After this, each directory's `size` equals the sum of all descendant file sizes.
///
/// Walks post-order with an explicit stack: after `group_loose_files` a child
/// can have a lower arena index than its parent, so index order is not enough.
pub fn aggregate_sizes(tree: &mut FileTree) {
    let mut stack: Vec<(NodeId, bool)> = vec![(tree.root, false)];

    while let Some((id, children_done)) = stack.pop() {
        if !tree.get(id).kind.is_group() {
            continue;
        }
        if children_done {
            let total: u64 = tree.children(id).map(|c| tree.get(c).size).sum();
            tree.get_mut(id).size = total;
        } else {
            stack.push((id, true));
            stack.extend(tree.children(id).map(|c| (c, false)));
        }
    }
}

/// Move the direct files of every directory that also has subdirectories
/// under a `LooseFiles` pseudo-node, so they are laid out as one group.
/// Returns the number of pseudo-nodes created. Run `aggregate_sizes` afterwards.
pub fn group_loose_files(tree: &mut FileTree) -> usize {
    let mut created = 0;
    let dirs: Vec<NodeId> = (0..tree.len() as u32)
        .map(NodeId)
        .filter(|&id| tree.get(id).kind == NodeKind::Directory)
        .collect();

    for dir in dirs {
        let (files, subdirs): (Vec<NodeId>, Vec<NodeId>) = tree
            .children(dir)
            .partition(|&c| tree.get(c).kind == NodeKind::File);
        if files.is_empty() || subdirs.is_empty() {
            continue;
        }

        let loose = tree.add_child(dir, LOOSE_FILES_NAME, 0, NodeKind::LooseFiles);
        tree.relink(loose, &files);

        let mut kept = subdirs;
        kept.push(loose);
        tree.relink(dir, &kept);
        created += 1;
    }

    if created > 0 {
        tracing::debug!("Grouped loose files under {} pseudo-directories", created);
    }
    created
}

/// Display name helper for debugging output.
pub fn display_name(tree: &FileTree, id: NodeId) -> CompactString {
    let node = tree.get(id);
    match node.kind {
        NodeKind::Directory => {
            let mut name = node.name.clone();
            name.push('/');
            name
        }
        _ => node.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileTree {
        let mut tree = FileTree::new("root");
        tree.insert_path("docs/a.txt", 10);
        tree.insert_path("docs/b.txt", 20);
        tree.insert_path("readme.md", 5);
        tree.insert_path("src/lib.rs", 40);
        tree.insert_path("src/util/mod.rs", 25);
        tree
    }

    #[test]
    fn sizes_sum_bottom_up() {
        let mut tree = sample();
        aggregate_sizes(&mut tree);
        assert_eq!(tree.get(tree.root).size, 100);
        let docs = tree
            .children(tree.root)
            .find(|&c| tree.get(c).name == "docs")
            .unwrap();
        assert_eq!(tree.get(docs).size, 30);
    }

    #[test]
    fn loose_files_move_under_pseudo_directory() {
        let mut tree = sample();
        let created = group_loose_files(&mut tree);
        aggregate_sizes(&mut tree);

        // root has readme.md next to docs/ and src/; src has lib.rs next to util/
        assert_eq!(created, 2);

        let root_kids: Vec<NodeId> = tree.children(tree.root).collect();
        let kinds: Vec<NodeKind> = root_kids.iter().map(|&c| tree.get(c).kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Directory, NodeKind::Directory, NodeKind::LooseFiles]
        );

        let loose = root_kids[2];
        assert_eq!(tree.get(loose).size, 5);
        assert_eq!(tree.get(tree.root).size, 100);

        // docs only holds files, so it is left alone
        let docs = root_kids[0];
        assert!(tree
            .children(docs)
            .all(|c| tree.get(c).kind == NodeKind::File));
    }

    #[test]
    fn insert_after_grouping_does_not_reach_into_pseudo_directory() {
        let mut tree = sample();
        group_loose_files(&mut tree);
        let before = tree.len();
        // readme.md moved under <Files>, so inserting it again at the root creates a new node
        tree.insert_path("readme.md", 7);
        assert_eq!(tree.len(), before + 1);
    }

    #[test]
    fn display_name_marks_directories() {
        let tree = sample();
        let docs = tree.children(tree.root).next().unwrap();
        assert_eq!(display_name(&tree, docs), "docs/");
    }
}

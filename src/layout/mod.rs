pub mod rect;
mod simple;
mod squarify;
pub mod surface;

use rayon::prelude::*;

use crate::config::TreemapConfig;
use crate::error::Result;
use crate::tree::WeightedTree;

pub use rect::{Axis, Orientation, Rect};
pub use surface::CushionSurface;

/// Index of a tile inside its [`TileTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A placed node: its rectangle and the cushion it will be shaded with.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<N> {
    pub id: TileId,
    pub node: N,
    pub rect: Rect,
    pub surface: CushionSurface,
    /// Nesting level (root = 0)
    pub depth: u32,
    pub parent: Option<TileId>,
    children: Vec<TileId>,
}

impl<N> Tile<N> {
    pub fn children(&self) -> &[TileId] {
        &self.children
    }
}

/// Result of one layout pass, stored depth-first (pre-order).
///
/// Index 0 is always the root tile covering the whole target rectangle.
/// The tree is immutable once built; a new pass builds a new tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TileTree<N> {
    tiles: Vec<Tile<N>>,
}

impl<N: Copy> TileTree<N> {
    pub fn root(&self) -> &Tile<N> {
        &self.tiles[0]
    }

    pub fn get(&self, id: TileId) -> &Tile<N> {
        &self.tiles[id.index()]
    }

    /// All tiles, parents before their children.
    pub fn tiles(&self) -> &[Tile<N>] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile<N>> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether only the root tile exists.
    pub fn has_no_children(&self) -> bool {
        self.tiles.len() <= 1
    }

    pub fn children(&self, id: TileId) -> impl Iterator<Item = &Tile<N>> + '_ {
        self.get(id).children.iter().map(|&c| self.get(c))
    }

    /// Tiles without placed children.
    pub fn leaves(&self) -> impl Iterator<Item = &Tile<N>> + '_ {
        self.tiles.iter().filter(|t| t.children.is_empty())
    }
}

/// A child position computed by one of the strategies, before it becomes a tile.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement<N> {
    pub node: N,
    pub rect: Rect,
    pub surface: CushionSurface,
    pub orientation: Orientation,
}

/// Work item of the explicit build stack.
struct Pending<N> {
    placement: Placement<N>,
    depth: u32,
    parent: Option<TileId>,
}

/// Lay out `root` into `rect`.
///
/// Fails only for an invalid configuration, before any work is done.
/// Degenerate input (zero weight, empty rect) yields a tree with just the root tile.
pub fn layout<T: WeightedTree>(
    tree: &T,
    root: T::Node,
    rect: Rect,
    config: &TreemapConfig,
) -> Result<TileTree<T::Node>> {
    config.validate()?;
    log_pass(tree, root, rect, config);

    let tiles = build(tree, root_pending(root, rect, config), config);

    tracing::debug!("Layout produced {} tiles", tiles.len());
    Ok(TileTree { tiles })
}

/// Same result as [`layout`], with the root's child subtrees built on the rayon pool.
pub fn layout_par<T: WeightedTree>(
    tree: &T,
    root: T::Node,
    rect: Rect,
    config: &TreemapConfig,
) -> Result<TileTree<T::Node>> {
    config.validate()?;
    log_pass(tree, root, rect, config);

    let mut seed = root_pending(root, rect, config).placement;
    let top_level = place_children(tree, &mut seed, config);

    let subtrees: Vec<Vec<Tile<T::Node>>> = top_level
        .into_par_iter()
        .map(|placement| {
            let pending = Pending {
                placement,
                depth: 1,
                parent: None,
            };
            build(tree, pending, config)
        })
        .collect();

    let total = 1 + subtrees.iter().map(Vec::len).sum::<usize>();
    let mut tiles = Vec::with_capacity(total);
    tiles.push(Tile {
        id: TileId(0),
        node: seed.node,
        rect: seed.rect,
        surface: seed.surface,
        depth: 0,
        parent: None,
        children: Vec::with_capacity(subtrees.len()),
    });

    for subtree in subtrees {
        let offset = tiles.len() as u32;
        let shift = |id: TileId| TileId(id.0 + offset);
        tiles[0].children.push(TileId(offset));
        for mut tile in subtree {
            tile.id = shift(tile.id);
            tile.parent = Some(tile.parent.map_or(TileId(0), shift));
            for child in &mut tile.children {
                *child = shift(*child);
            }
            tiles.push(tile);
        }
    }

    tracing::debug!("Parallel layout produced {} tiles", tiles.len());
    Ok(TileTree { tiles })
}

fn root_pending<N>(root: N, rect: Rect, config: &TreemapConfig) -> Pending<N> {
    Pending {
        placement: Placement {
            node: root,
            rect,
            surface: CushionSurface::new(config.cushion_height),
            orientation: config.orientation,
        },
        depth: 0,
        parent: None,
    }
}

fn log_pass<T: WeightedTree>(tree: &T, root: T::Node, rect: Rect, config: &TreemapConfig) {
    tracing::debug!(
        "Laying out {:?} (weight={}) in {}x{} at ({}, {}) with {} strategy",
        root,
        tree.weight(root),
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        if config.squarify { "squarified" } else { "simple" }
    );
}

/// Depth-first build from one seed. Uses an explicit stack so tree depth is
/// not bounded by the thread's stack size. Tile ids are local to the result.
fn build<T: WeightedTree>(
    tree: &T,
    seed: Pending<T::Node>,
    config: &TreemapConfig,
) -> Vec<Tile<T::Node>> {
    let mut tiles: Vec<Tile<T::Node>> = Vec::new();
    let mut stack = vec![seed];

    while let Some(Pending {
        mut placement,
        depth,
        parent,
    }) = stack.pop()
    {
        let id = TileId(tiles.len() as u32);
        if let Some(parent) = parent {
            tiles[parent.index()].children.push(id);
        }

        let children = place_children(tree, &mut placement, config);
        // Reversed so the first child is popped (and numbered) first
        stack.extend(children.into_iter().rev().map(|child| Pending {
            placement: child,
            depth: depth + 1,
            parent: Some(id),
        }));

        tiles.push(Tile {
            id,
            node: placement.node,
            rect: placement.rect,
            surface: placement.surface,
            depth,
            parent,
            children: Vec::new(),
        });
    }

    tiles
}

/// Positions of `parent`'s children inside `parent.rect`. The simple strategy
/// also adds a ridge to the parent's own surface.
fn place_children<T: WeightedTree>(
    tree: &T,
    parent: &mut Placement<T::Node>,
    config: &TreemapConfig,
) -> Vec<Placement<T::Node>> {
    if parent.rect.is_empty() || tree.is_leaf(parent.node) {
        return Vec::new();
    }
    let weight = tree.weight(parent.node);
    if weight == 0 {
        return Vec::new();
    }

    if config.squarify {
        squarify::place(tree, parent, weight, config)
    } else {
        simple::place(tree, parent, weight, config)
    }
}

/// Children that would get at least `min_tile_size` at `scale` (size per
/// unit of weight), heaviest first, ties in input order.
fn sorted_children<T: WeightedTree>(
    tree: &T,
    node: T::Node,
    scale: f64,
    min_tile_size: f64,
) -> Vec<(T::Node, u64)> {
    let mut children: Vec<(T::Node, u64)> = tree
        .children(node)
        .map(|child| (child, tree.weight(child)))
        .filter(|&(_, weight)| weight > 0 && scale * weight as f64 >= min_tile_size)
        .collect();
    children.sort_by_key(|&(_, weight)| std::cmp::Reverse(weight));
    children
}

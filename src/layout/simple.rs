use super::{sorted_children, Placement};
use crate::config::TreemapConfig;
use crate::tree::WeightedTree;

/// Alternating-axis split ("slice and dice").
///
/// Children are laid side by side along the primary axis, each getting
/// `scale · weight` of it, truncated. The truncation is not redistributed,
/// so a strip of a few units may stay empty at the end, but every child that
/// passed the size filter gets a tile. The running offset is clamped so no
/// child ever leaves the parent.
///
/// The parent's own surface gets a ridge across the split direction; every
/// child then adds its own ridge along it.
pub(super) fn place<T: WeightedTree>(
    tree: &T,
    parent: &mut Placement<T::Node>,
    weight: u64,
    config: &TreemapConfig,
) -> Vec<Placement<T::Node>> {
    let rect = parent.rect;
    let dir = parent.orientation.resolve(&rect);
    let primary = rect.extent(dir);
    let scale = primary as f64 / weight as f64;

    let height = parent.surface.height;
    parent.surface.add_ridge(dir.perpendicular(), height, &rect);
    let base = parent.surface;
    let child_height = base.height * config.height_scale_factor;

    let children = sorted_children(tree, parent.node, scale, config.min_tile_size);
    let mut placements = Vec::with_capacity(children.len());
    let mut offset: u32 = 0;

    for (child, child_weight) in children {
        // The epsilon keeps exact fits (a single child) from flooring one unit short
        let extent = ((scale * child_weight as f64 + 1e-9) as u32).min(primary - offset);

        let child_rect = rect.slice(dir, offset, extent);
        placements.push(Placement {
            node: child,
            rect: child_rect,
            surface: base.with_ridge(dir, child_height, &child_rect),
            orientation: parent.orientation.flipped(),
        });
        offset += extent;
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::super::{layout, Axis, CushionSurface, Orientation, Rect, TileId};
    use crate::config::TreemapConfig;
    use crate::tree::aggregate::aggregate_sizes;
    use crate::tree::arena::FileTree;
    use pretty_assertions::assert_eq;

    fn simple(orientation: Orientation) -> TreemapConfig {
        TreemapConfig {
            squarify: false,
            min_tile_size: 1.0,
            orientation,
            ..TreemapConfig::default()
        }
    }

    fn child_rects(tree: &FileTree, rect: Rect, config: &TreemapConfig) -> Vec<Rect> {
        let tiles = layout(tree, tree.root, rect, config).unwrap();
        tiles.children(TileId(0)).map(|t| t.rect).collect()
    }

    #[test]
    fn splits_horizontally_in_descending_order() {
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "small", 20);
        tree.add_file(tree.root, "big", 50);
        tree.add_file(tree.root, "mid", 30);
        aggregate_sizes(&mut tree);

        let rects = child_rects(&tree, Rect::new(0, 0, 100, 40), &simple(Orientation::Horizontal));
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 50, 40),
                Rect::new(50, 0, 30, 40),
                Rect::new(80, 0, 20, 40),
            ]
        );
    }

    #[test]
    fn vertical_split_alternates_at_next_level() {
        let mut tree = FileTree::new("root");
        tree.insert_path("a/1", 30);
        tree.insert_path("a/2", 10);
        tree.insert_path("b", 40);
        aggregate_sizes(&mut tree);

        let config = simple(Orientation::Vertical);
        let tiles = layout(&tree, tree.root, Rect::new(0, 0, 80, 80), &config).unwrap();
        let top: Vec<Rect> = tiles.children(TileId(0)).map(|t| t.rect).collect();
        // Vertical: stacked rows of full width
        assert_eq!(top, vec![Rect::new(0, 0, 80, 40), Rect::new(0, 40, 80, 40)]);

        // Next level splits horizontally inside "a"
        let a = tiles.children(TileId(0)).next().unwrap();
        let inner: Vec<Rect> = tiles.children(a.id).map(|t| t.rect).collect();
        assert_eq!(inner, vec![Rect::new(0, 0, 60, 40), Rect::new(60, 0, 20, 40)]);
    }

    #[test]
    fn truncation_remainder_stays_unfilled_and_never_overflows() {
        let mut tree = FileTree::new("root");
        for i in 0..3 {
            tree.add_file(tree.root, &format!("f{i}"), 1);
        }
        aggregate_sizes(&mut tree);

        // 100 / 3 = 33.33 → 33 each, one unit left over
        let rects = child_rects(&tree, Rect::new(0, 0, 100, 10), &simple(Orientation::Horizontal));
        let used: u32 = rects.iter().map(|r| r.width).sum();
        assert_eq!(used, 99);

        // 101 / 2 = 50.5 → 50 each
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "a", 1);
        tree.add_file(tree.root, "b", 1);
        aggregate_sizes(&mut tree);
        let rects = child_rects(&tree, Rect::new(0, 0, 101, 10), &simple(Orientation::Horizontal));
        assert_eq!(rects, vec![Rect::new(0, 0, 50, 10), Rect::new(50, 0, 50, 10)]);
    }

    #[test]
    fn every_child_above_min_length_gets_a_strip() {
        // 97 / 38 = 2.55 per child: rounding up would run out of room
        let mut tree = FileTree::new("root");
        for i in 0..38 {
            tree.add_file(tree.root, &format!("f{i}"), 7);
        }
        aggregate_sizes(&mut tree);

        let rects = child_rects(&tree, Rect::new(0, 0, 97, 10), &simple(Orientation::Horizontal));
        assert_eq!(rects.len(), 38);
        assert!(rects.iter().all(|r| r.width == 2));
        assert_eq!(rects.last().unwrap().x, 74);
    }

    #[test]
    fn single_child_fills_the_parent() {
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "only", 3);
        aggregate_sizes(&mut tree);

        let rects = child_rects(&tree, Rect::new(0, 0, 77, 10), &simple(Orientation::Horizontal));
        assert_eq!(rects, vec![Rect::new(0, 0, 77, 10)]);
    }

    #[test]
    fn children_below_min_length_are_dropped() {
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "big", 98);
        tree.add_file(tree.root, "tiny", 2);
        aggregate_sizes(&mut tree);

        let config = TreemapConfig {
            min_tile_size: 3.0,
            ..simple(Orientation::Horizontal)
        };
        // tiny would get 2 units < 3
        let rects = child_rects(&tree, Rect::new(0, 0, 100, 10), &config);
        assert_eq!(rects, vec![Rect::new(0, 0, 98, 10)]);
    }

    #[test]
    fn child_surface_extends_parent_ridges() {
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "a", 1);
        tree.add_file(tree.root, "b", 1);
        aggregate_sizes(&mut tree);

        let config = TreemapConfig {
            height_scale_factor: 0.5,
            cushion_height: 1.0,
            ..simple(Orientation::Horizontal)
        };
        let rect = Rect::new(0, 0, 100, 50);
        let tiles = layout(&tree, tree.root, rect, &config).unwrap();
        let second = tiles.children(TileId(0)).nth(1).unwrap();

        let expected = CushionSurface::new(1.0)
            .with_ridge(Axis::Vertical, 1.0, &rect)
            .with_ridge(Axis::Horizontal, 0.5, &Rect::new(50, 0, 50, 50));
        assert_eq!(second.surface, expected);
        assert_eq!(second.surface.height, 0.5);

        // The parent keeps the ridge it laid across the split
        let parent = CushionSurface::new(1.0).with_ridge(Axis::Vertical, 1.0, &rect);
        assert_eq!(tiles.root().surface, parent);
    }

    #[test]
    fn zero_weight_parent_surface_is_untouched() {
        let mut tree = FileTree::new("root");
        tree.add_file(tree.root, "a", 0);
        aggregate_sizes(&mut tree);

        let config = simple(Orientation::Horizontal);
        let tiles = layout(&tree, tree.root, Rect::new(0, 0, 10, 10), &config).unwrap();
        assert_eq!(tiles.root().surface, CushionSurface::new(config.cushion_height));
    }
}

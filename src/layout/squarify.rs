use super::{sorted_children, Axis, Placement, Rect};
use crate::config::TreemapConfig;
use crate::tree::WeightedTree;

/// Squarified layout (Bruls, Huizing, van Wijk).
///
/// Children are consumed heaviest first in rows. A row grows while adding
/// the next child strictly improves the row's worst aspect ratio; it is then
/// laid along the longer side of the remaining rectangle and cut off it.
pub(super) fn place<T: WeightedTree>(
    tree: &T,
    parent: &Placement<T::Node>,
    weight: u64,
    config: &TreemapConfig,
) -> Vec<Placement<T::Node>> {
    let scale = parent.rect.area() as f64 / weight as f64;
    let children = sorted_children(tree, parent.node, scale, config.min_tile_size);

    let mut placements = Vec::with_capacity(children.len());
    let mut remaining = parent.rect;
    let mut next = 0;

    while next < children.len() {
        let length = remaining.longer_side();
        if length == 0 {
            tracing::warn!(
                "Squarify: no space left for {} children of {:?}",
                children.len() - next,
                parent.node
            );
            break;
        }

        let row_len = row_length(&children[next..], length, scale);
        let row = &children[next..next + row_len];
        match layout_row(parent, remaining, scale, row, config, &mut placements) {
            Some(rest) => remaining = rest,
            None => {
                tracing::trace!(
                    "Squarify: row too thin in {:?}, dropping {} children of {:?}",
                    remaining,
                    children.len() - next,
                    parent.node
                );
                break;
            }
        }
        next += row_len;
    }

    placements
}

/// Number of leading `items` that form the next row along a side of `length`.
/// Always at least one.
fn row_length<N>(items: &[(N, u64)], length: u32, scale: f64) -> usize {
    // Work in weight units: one scaling instead of one per candidate
    let scaled_length_sq = length as f64 * length as f64 / scale;
    let first = items[0].1 as f64;

    let mut sum = 0.0;
    let mut last_worst = f64::INFINITY;
    let mut count = 0;

    for &(_, weight) in items {
        sum += weight as f64;
        let worst = worst_aspect_ratio(first, weight as f64, sum, scaled_length_sq);
        if worst >= last_worst {
            break;
        }
        last_worst = worst;
        count += 1;
    }

    count.max(1)
}

/// Worst aspect ratio of a row whose largest member is `first` and smallest
/// is `last`, all members summing to `sum`.
fn worst_aspect_ratio(first: f64, last: f64, sum: f64, scaled_length_sq: f64) -> f64 {
    let sum_sq = sum * sum;
    f64::max(
        scaled_length_sq * first / sum_sq,
        sum_sq / (scaled_length_sq * last),
    )
}

/// Place `row` along the longer side of `rect`. Returns what is left of
/// `rect`, or `None` when the row would be thinner than the minimum tile size.
fn layout_row<N: Copy>(
    parent: &Placement<N>,
    rect: Rect,
    scale: f64,
    row: &[(N, u64)],
    config: &TreemapConfig,
    out: &mut Vec<Placement<N>>,
) -> Option<Rect> {
    let dir = if rect.width > rect.height {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let across = dir.perpendicular();
    let primary = rect.extent(dir);

    let sum: u64 = row.iter().map(|&(_, w)| w).sum();
    // The epsilon keeps exact fits (e.g. the last row) from flooring one unit short
    let secondary =
        ((sum as f64 * scale / primary as f64 + 1e-9) as u32).min(rect.extent(across));
    if secondary == 0 || (secondary as f64) < config.min_tile_size {
        return None;
    }

    // One ridge across the row groups its members optically. The row starts
    // from the parent's own surface, not from anything a sibling row added.
    let row_surface = parent.surface.with_ridge(
        across,
        parent.surface.height * config.height_scale_factor,
        &rect,
    );
    let child_height = row_surface.height * config.height_scale_factor;

    let mut offset: u32 = 0;
    let mut left = primary;

    for &(child, weight) in row {
        let size = ((weight as f64 / sum as f64 * primary as f64).round() as u32).min(left);
        left -= size;

        if size == 0 || (size as f64) < config.min_tile_size {
            continue;
        }

        let child_rect = match dir {
            Axis::Horizontal => Rect::new(rect.x + offset as i32, rect.y, size, secondary),
            Axis::Vertical => Rect::new(rect.x, rect.y + offset as i32, secondary, size),
        };
        out.push(Placement {
            node: child,
            rect: child_rect,
            surface: row_surface.with_ridge(dir, child_height, &child_rect),
            orientation: parent.orientation,
        });
        offset += size;
    }

    Some(rect.cut_leading(across, secondary))
}

pub mod contrast;
pub mod cushion;
pub mod pixel;

use rayon::prelude::*;

use crate::config::TreemapConfig;
use crate::layout::{Rect, Tile, TileId, TileTree};
use crate::tree::WeightedTree;
use contrast::ensure_contrast;
use cushion::{render_cushion, Lighting};
use pixel::{PixelBuffer, Rgb};

/// Canvas color where no tile was placed.
pub const BACKGROUND: Rgb = Rgb::new(20, 22, 28);

impl From<&TreemapConfig> for Lighting {
    fn from(config: &TreemapConfig) -> Self {
        Lighting {
            ambient: config.ambient_light,
            direction: config.light,
        }
    }
}

/// Pixels for one tile, or `None` for group tiles (directories and loose-files
/// groups), which are painted flat by whoever displays them.
pub fn render_tile<T: WeightedTree>(
    tree: &T,
    tile: &Tile<T::Node>,
    config: &TreemapConfig,
    base: Rgb,
) -> Option<PixelBuffer> {
    if !tree.is_leaf(tile.node) {
        return None;
    }
    if !config.cushion_shading {
        return Some(PixelBuffer::filled(tile.rect.width, tile.rect.height, base));
    }

    let mut buf = render_cushion(&tile.rect, &tile.surface, &Lighting::from(config), base);
    if config.ensure_contrast {
        ensure_contrast(&mut buf);
    }
    Some(buf)
}

/// Render every leaf tile in parallel. Results are in tile order.
pub fn render_leaves<T, F>(
    tree: &T,
    tiles: &TileTree<T::Node>,
    config: &TreemapConfig,
    color_of: F,
) -> Vec<(TileId, PixelBuffer)>
where
    T: WeightedTree,
    F: Fn(T::Node) -> Rgb + Sync,
{
    let rendered: Vec<(TileId, PixelBuffer)> = tiles
        .tiles()
        .par_iter()
        .filter_map(|tile| {
            render_tile(tree, tile, config, color_of(tile.node)).map(|buf| (tile.id, buf))
        })
        .collect();

    tracing::debug!(
        "Rendered {} leaf tiles ({} total)",
        rendered.len(),
        tiles.len()
    );
    rendered
}

/// Paint the whole tile tree into one canvas the size of the root rectangle:
/// group tiles as flat fills, leaf tiles as rendered by [`render_leaves`].
pub fn compose<T, F>(
    tree: &T,
    tiles: &TileTree<T::Node>,
    config: &TreemapConfig,
    color_of: F,
) -> PixelBuffer
where
    T: WeightedTree,
    F: Fn(T::Node) -> Rgb + Sync,
{
    let origin = tiles.root().rect;
    let mut canvas = PixelBuffer::filled(origin.width, origin.height, BACKGROUND);
    let local =
        |rect: &Rect| Rect::new(rect.x - origin.x, rect.y - origin.y, rect.width, rect.height);

    // Pre-order, so nested groups paint over their parents
    for tile in tiles.iter().filter(|t| !tree.is_leaf(t.node)) {
        canvas.fill_rect(&local(&tile.rect), color_of(tile.node));
    }

    // Leaves never overlap anything painted after them, so they can go last
    for (id, buf) in render_leaves(tree, tiles, config, &color_of) {
        let at = local(&tiles.get(id).rect);
        canvas.blit(&buf, at.x, at.y);
    }

    canvas
}

// Public library interface for cushion-treemap
// Layout (squarified or simple strips) plus cushion shading of the leaf tiles

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod tree;

pub use config::TreemapConfig;
pub use error::{Result, TreemapError};
pub use layout::{
    layout, layout_par, Axis, CushionSurface, Orientation, Rect, Tile, TileId, TileTree,
};
pub use render::pixel::{PixelBuffer, Rgb};
pub use render::{compose, render_leaves, render_tile};
pub use tree::{NodeKind, WeightedTree};

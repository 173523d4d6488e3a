use crate::error::{Result, TreemapError};
use crate::layout::Orientation;

/// Everything a layout + shading pass depends on. There is no hidden state:
/// the same config, tree and rectangle always give the same tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapConfig {
    /// Squarified layout when true, alternating-axis split otherwise
    pub squarify: bool,
    /// Placement cutoff. A length in simple mode, an area in squarified mode.
    pub min_tile_size: f64,
    /// Per-level ridge height decay, in (0, 1]
    pub height_scale_factor: f64,
    /// Ridge height of the root surface
    pub cushion_height: f64,
    /// Ambient light floor for every shaded channel
    pub ambient_light: u8,
    /// Light direction [x, y, z]; does not need to be normalized
    pub light: [f64; 3],
    /// Render leaf tiles as cushions (flat fill otherwise)
    pub cushion_shading: bool,
    /// Repair right/bottom edges that would merge with their neighbours
    pub ensure_contrast: bool,
    /// Initial split direction (simple strategy only)
    pub orientation: Orientation,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        // Light from the upper left, mostly from the front: (-1, -2, 10) normalized
        let (lx, ly, lz) = (-1.0_f64, -2.0, 10.0);
        let len = (lx * lx + ly * ly + lz * lz).sqrt();
        Self {
            squarify: true,
            min_tile_size: 3.0,
            height_scale_factor: 0.75,
            cushion_height: 0.5,
            ambient_light: 40,
            light: [lx / len, ly / len, lz / len],
            cushion_shading: true,
            ensure_contrast: true,
            orientation: Orientation::Auto,
        }
    }
}

impl TreemapConfig {
    /// Reject parameters the layout or shading math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.min_tile_size.is_finite() || self.min_tile_size < 0.0 {
            return Err(TreemapError::invalid(
                "min_tile_size",
                format!("must be a finite value >= 0, got {}", self.min_tile_size),
            ));
        }
        if !(self.height_scale_factor > 0.0 && self.height_scale_factor <= 1.0) {
            return Err(TreemapError::invalid(
                "height_scale_factor",
                format!("must be in (0, 1], got {}", self.height_scale_factor),
            ));
        }
        if !self.cushion_height.is_finite() || self.cushion_height <= 0.0 {
            return Err(TreemapError::invalid(
                "cushion_height",
                format!("must be a finite value > 0, got {}", self.cushion_height),
            ));
        }
        if self.light.iter().any(|c| !c.is_finite()) {
            return Err(TreemapError::invalid("light", "components must be finite"));
        }
        if self.light.iter().all(|&c| c == 0.0) {
            return Err(TreemapError::invalid("light", "must not be the zero vector"));
        }
        Ok(())
    }
}

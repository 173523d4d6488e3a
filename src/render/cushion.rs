use rayon::prelude::*;

use super::pixel::{PixelBuffer, Rgb};
use crate::layout::{CushionSurface, Rect};

/// Light setup for cushion shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Brightness every channel keeps even when facing away from the light
    pub ambient: u8,
    /// Direction towards the light [x, y, z]
    pub direction: [f64; 3],
}

/// Shade one tile's cushion into a buffer the size of `rect`.
///
/// Pixel `(x, y)` of the buffer samples the surface at the absolute layout
/// position `(rect.x + x, rect.y + y)`. The surface normal is `(nx, ny, 1)`
/// and the diffuse share of each channel (`base - ambient`) is scaled by the
/// cosine between normal and light, never below zero.
pub fn render_cushion(
    rect: &Rect,
    surface: &CushionSurface,
    lighting: &Lighting,
    base: Rgb,
) -> PixelBuffer {
    if rect.is_empty() {
        return PixelBuffer::empty();
    }

    let mut buf = PixelBuffer::filled(rect.width, rect.height, Rgb::default());
    let width = rect.width as usize;
    let (x0, y0) = (rect.x as f64, rect.y as f64);
    let [lx, ly, lz] = lighting.direction;
    let ambient = lighting.ambient;

    buf.pixels_mut()
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let (_, ny) = surface.normal(0.0, y as f64 + y0);
            for (x, pixel) in row.iter_mut().enumerate() {
                let (nx, _) = surface.normal(x as f64 + x0, 0.0);
                let cosa = (nx * lx + ny * ly + lz) / (nx * nx + ny * ny + 1.0).sqrt();
                *pixel = Rgb::new(
                    shade(base.r, ambient, cosa),
                    shade(base.g, ambient, cosa),
                    shade(base.b, ambient, cosa),
                );
            }
        });

    buf
}

fn shade(channel: u8, ambient: u8, cosa: f64) -> u8 {
    let diffuse = channel.saturating_sub(ambient) as f64;
    let lit = (diffuse * cosa).round().max(0.0);
    (ambient as f64 + lit).min(255.0) as u8
}

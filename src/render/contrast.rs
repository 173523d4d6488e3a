use super::pixel::PixelBuffer;

/// How far inward the reference samples are taken.
const INSET: u32 = 5;
/// Minimum distance between samples along an edge.
const MIN_INTERVAL: u32 = 5;

/// Which edges `ensure_contrast` repainted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeRepair {
    pub right: bool,
    pub bottom: bool,
}

/// Keep a shaded tile from visually merging with its right and bottom neighbours.
///
/// Samples along each of those edges are compared with pixels `INSET` further
/// inside. If more than 10% of them match, the tile has no visible falloff
/// there and the outermost column (or row) is repainted in a contrasting
/// color. Nothing but that column and row is ever written.
pub fn ensure_contrast(buf: &mut PixelBuffer) -> EdgeRepair {
    let (w, h) = (buf.width(), buf.height());
    let mut repair = EdgeRepair::default();

    if w > INSET {
        let (x_in, x_edge) = (w - 1 - INSET, w - 1);
        let interval = (h / 10).max(MIN_INTERVAL);
        let (same, samples) = count_matches(
            (interval..h).step_by(interval as usize),
            |y| buf.get(x_in, y) == buf.get(x_edge, y),
        );
        if same * 10 > samples {
            let color = buf.get(x_edge, h / 2).contrasting();
            for y in 0..h {
                buf.set(x_edge, y, color);
            }
            repair.right = true;
        }
    }

    if h > INSET {
        let (y_in, y_edge) = (h - 1 - INSET, h - 1);
        let interval = (w / 10).max(MIN_INTERVAL);
        let (same, samples) = count_matches(
            (interval..w).step_by(interval as usize),
            |x| buf.get(x, y_in) == buf.get(x, y_edge),
        );
        if same * 10 > samples {
            let color = buf.get(w / 2, y_edge).contrasting();
            for x in 0..w {
                buf.set(x, y_edge, color);
            }
            repair.bottom = true;
        }
    }

    repair
}

fn count_matches(positions: impl Iterator<Item = u32>, same: impl Fn(u32) -> bool) -> (u32, u32) {
    positions.fold((0, 0), |(matches, total), p| (matches + same(p) as u32, total + 1))
}

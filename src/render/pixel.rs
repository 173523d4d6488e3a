use std::io::{self, Write};

use bytemuck::{Pod, Zeroable};

use crate::layout::Rect;

/// 8-bit RGB pixel, laid out so a pixel slice can be handed out as raw bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Dark channels are doubled, bright ones halved.
    pub fn contrasting(self) -> Self {
        fn flip(c: u8) -> u8 {
            if c < 128 {
                c * 2
            } else {
                c / 2
            }
        }
        Self::new(flip(self.r), flip(self.g), flip(self.b))
    }
}

/// Row-major RGB image owned by whoever asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn empty() -> Self {
        Self::filled(0, 0, Rgb::default())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.offset(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.offset(x, y);
        self.pixels[idx] = color;
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Raw `r, g, b, r, g, b, ...` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill `rect` (in buffer coordinates), clipped to the buffer.
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgb) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = y * self.width as usize;
            self.pixels[row + x0..row + x1].fill(color);
        }
    }

    /// Copy `src` with its top-left corner at `(x, y)`, clipped to the buffer.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        let target = Rect::new(x, y, src.width, src.height);
        let Some((x0, y0, x1, y1)) = self.clip(&target) else {
            return;
        };
        let sx = (x0 as i64 - x as i64) as usize;
        let sy = (y0 as i64 - y as i64) as usize;
        for (i, dy) in (y0..y1).enumerate() {
            let src_row = (sy + i) * src.width as usize + sx;
            let dst_row = dy * self.width as usize;
            self.pixels[dst_row + x0..dst_row + x1]
                .copy_from_slice(&src.pixels[src_row..src_row + (x1 - x0)]);
        }
    }

    /// Binary PPM (P6), handy for eyeballing a render.
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        out.write_all(self.as_bytes())?;
        out.flush()
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }

    fn clip(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let x0 = (rect.x as i64).clamp(0, self.width as i64);
        let y0 = (rect.y as i64).clamp(0, self.height as i64);
        let x1 = rect.right().clamp(0, self.width as i64);
        let y1 = rect.bottom().clamp(0, self.height as i64);
        (x0 < x1 && y0 < y1).then_some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

// The drawing surface: an owned RGBA raster plus the small trait the bucket
// works against.
// The bucket only needs four things from a canvas: read every pixel, write every
// pixel back, and get or set a single one. Anything that can do that (the
// in-memory [`Raster`], a test double counting writes, a GPU readback) can be filled.

use crate::color::Rgba;
use crate::types::FrameBuffer;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A canvas the bucket and brush can paint on.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Copy of the whole buffer, row-major RGBA, `width * height * 4` bytes.
    fn read_pixels(&self) -> Vec<u8>;

    /// Replace the whole buffer in one go (one composite update).
    ///
    /// # Panics
    /// If `pixels` is not exactly `width * height * 4` bytes long.
    fn write_pixels(&mut self, pixels: &[u8]);

    /// Pixel at (x, y), or `None` outside the surface.
    fn pixel(&self, x: usize, y: usize) -> Option<Rgba>;

    /// Set one pixel. Returns false (and does nothing) outside the surface.
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> bool;

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width() as u64 && (y as u64) < self.height() as u64
    }
}

/// Owned width × height × 4 byte arena. Visual: the paper the child draws on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self { width, height, data }
    }

    /// Blank opaque white paper.
    pub fn blank(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgba::new(255, 255, 255, 255))
    }

    /// Wrap an existing RGBA buffer. `None` if the length doesn't match the size.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * CHANNELS).then_some(Self { width, height, data })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Overwrite every pixel with `color` (used by reset).
    pub fn clear(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Copy of this raster at a new size: old pixels stay anchored at the top-left,
    /// uncovered area becomes `background`, anything past the new edge is cropped.
    pub fn resized(&self, width: usize, height: usize, background: Rgba) -> Self {
        let mut out = Raster::filled(width, height, background);
        let copy_w = self.width.min(width) * CHANNELS;
        for y in 0..self.height.min(height) {
            let src = self.offset(0, y);
            let dst = out.offset(0, y);
            out.data[dst..dst + copy_w].copy_from_slice(&self.data[src..src + copy_w]);
        }
        out
    }

    /// Render into the window buffer, blending translucent pixels over white paper.
    /// Visual: erased holes show as white, like the white card behind the page canvas.
    pub fn composite_over_white(&self, fb: &mut FrameBuffer) {
        debug_assert_eq!(fb.width, self.width);
        debug_assert_eq!(fb.height, self.height);
        for (dst, px) in fb.pixels.iter_mut().zip(self.data.chunks_exact(CHANNELS)) {
            let a = px[3] as u32;
            let over = |c: u8| (c as u32 * a + 255 * (255 - a) + 127) / 255;
            *dst = (over(px[0]) << 16) | (over(px[1]) << 8) | over(px[2]);
        }
    }
}

impl Surface for Raster {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn read_pixels(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn write_pixels(&mut self, pixels: &[u8]) {
        assert_eq!(pixels.len(), self.data.len(), "write_pixels: size mismatch");
        self.data.copy_from_slice(pixels);
    }

    fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let p = &self.data[i..i + CHANNELS];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        true
    }
}

// Paint bucket: recolor the 4-connected patch of similar pixels under the click.
// Scanline variant: each work item grows into a full horizontal span, and only the
// first pixel of every fillable run above and below that span is pushed. The stack
// therefore tracks the open edge of the fill rather than every pixel of it, so a fill
// covering the whole canvas stays cheap on memory.
// Membership is always decided against the pixel's color *before* this fill. Painted
// pixels are marked visited, so they are never tested again and each pixel is
// painted at most once regardless of how close the new color is to the old one.

use tracing::debug;

use crate::color::{color_match, Rgb, Rgba};
use crate::surface::{Surface, CHANNELS};

/// Inclusive pixel rectangle touched by a fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    fn point(x: usize, y: usize) -> Self {
        Self { x0: x, y0: y, x1: x, y1: y }
    }

    fn include_span(&mut self, lx: usize, rx: usize, y: usize) {
        self.x0 = self.x0.min(lx);
        self.x1 = self.x1.max(rx);
        self.y0 = self.y0.min(y);
        self.y1 = self.y1.max(y);
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }
}

/// What one click of the bucket did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Pixels repainted. Zero means the surface was not touched at all.
    pub filled: usize,
    /// Bounding box of the repainted pixels.
    pub bounds: Option<PixelRect>,
}

impl FillReport {
    pub fn changed(&self) -> bool {
        self.filled > 0
    }
}

struct Bucket {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    visited: Vec<bool>,
    reference: Rgba,
    tolerance: u8,
    paint: Rgba,
    stack: Vec<(usize, usize)>,
    filled: usize,
    bounds: PixelRect,
}

impl Bucket {
    #[inline]
    fn color_at(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * CHANNELS;
        let p = &self.pixels[i..i + CHANNELS];
        Rgba::new(p[0], p[1], p[2], p[3])
    }

    /// Unvisited, same alpha as the seed, and every channel within tolerance.
    #[inline]
    fn fillable(&self, x: usize, y: usize) -> bool {
        if self.visited[y * self.width + x] {
            return false;
        }
        let c = self.color_at(x, y);
        c.a == self.reference.a && color_match(c.rgb(), self.reference.rgb(), self.tolerance)
    }

    #[inline]
    fn paint(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        self.visited[idx] = true;
        let i = idx * CHANNELS;
        let p = self.paint;
        self.pixels[i..i + CHANNELS].copy_from_slice(&[p.r, p.g, p.b, p.a]);
    }

    /// Push the first pixel of every fillable run in row `y` between `lx..=rx`.
    fn push_runs(&mut self, lx: usize, rx: usize, y: usize) {
        let mut in_run = false;
        for x in lx..=rx {
            if self.fillable(x, y) {
                if !in_run {
                    self.stack.push((x, y));
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
    }

    fn run(&mut self) {
        while let Some((x, y)) = self.stack.pop() {
            // Already swallowed by a span painted after this point was pushed.
            if !self.fillable(x, y) {
                continue;
            }

            let mut lx = x;
            while lx > 0 && self.fillable(lx - 1, y) {
                lx -= 1;
            }
            let mut rx = x;
            while rx + 1 < self.width && self.fillable(rx + 1, y) {
                rx += 1;
            }

            for cx in lx..=rx {
                self.paint(cx, y);
            }
            self.filled += rx - lx + 1;
            self.bounds.include_span(lx, rx, y);

            if y > 0 {
                self.push_runs(lx, rx, y - 1);
            }
            if y + 1 < self.height {
                self.push_runs(lx, rx, y + 1);
            }
        }
    }
}

/// Fill the region around (`x`, `y`) with `color` at full opacity.
///
/// The region is every pixel reachable from the seed through up/down/left/right
/// neighbors whose original RGB is within `tolerance` of the seed's on each channel
/// and whose original alpha equals the seed's.
///
/// Nothing happens (and nothing is written back) when the seed lies outside the
/// surface or already holds exactly `color` at full opacity. Otherwise the surface is
/// read once and written back once.
///
/// The already-filled check is an exact comparison on purpose. Skipping whenever the
/// seed is merely *within tolerance* of `color` would turn every high-tolerance click
/// into a no-op and make a larger tolerance fill less.
pub fn flood_fill<S: Surface + ?Sized>(
    surface: &mut S,
    x: i64,
    y: i64,
    color: Rgb,
    tolerance: u8,
) -> FillReport {
    if !surface.contains(x, y) {
        debug!(x, y, "fill seed outside canvas, ignored");
        return FillReport::default();
    }
    let (sx, sy) = (x as usize, y as usize);
    let (width, height) = (surface.width(), surface.height());

    let mut bucket = Bucket {
        width,
        height,
        pixels: surface.read_pixels(),
        visited: vec![false; width * height],
        reference: Rgba::TRANSPARENT,
        tolerance,
        paint: color.opaque(),
        stack: vec![(sx, sy)],
        filled: 0,
        bounds: PixelRect::point(sx, sy),
    };
    bucket.reference = bucket.color_at(sx, sy);

    if bucket.reference == bucket.paint {
        debug!(x, y, %color, "seed already holds fill color, nothing to do");
        return FillReport::default();
    }

    bucket.run();
    surface.write_pixels(&bucket.pixels);

    debug!(
        x,
        y,
        %color,
        tolerance,
        filled = bucket.filled,
        "bucket fill"
    );
    FillReport { filled: bucket.filled, bounds: Some(bucket.bounds) }
}

// Freehand brush and eraser.
// Visual: holding the mouse paints a continuous round-capped line; the eraser cuts
// see-through holes (white on screen) with the same tip.

use crate::color::{Rgb, Rgba};
use crate::surface::Surface;
use crate::types::Stamp;

/// Smallest and largest brush the size slider allows.
pub const MIN_BRUSH: u32 = 1;
pub const MAX_BRUSH: u32 = 50;

/// What a dab leaves behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    /// Opaque paint in this color.
    Paint(Rgb),
    /// Clear to fully transparent.
    Erase,
}

impl Ink {
    fn pixel(self) -> Rgba {
        match self {
            Ink::Paint(c) => c.opaque(),
            Ink::Erase => Rgba::TRANSPARENT,
        }
    }
}

/// Press the stamp once centered at (cx, cy). Returns how many pixels it covered.
pub fn dab<S: Surface + ?Sized>(surface: &mut S, cx: i64, cy: i64, stamp: &Stamp, ink: Ink) -> usize {
    let px = ink.pixel();
    let mut touched = 0;
    for &(dx, dy) in &stamp.offsets {
        let (x, y) = (cx.saturating_add(dx as i64), cy.saturating_add(dy as i64));
        if !surface.contains(x, y) {
            continue;
        }
        if surface.set_pixel(x as usize, y as usize, px) {
            touched += 1;
        }
    }
    touched
}

/// Stamp along the straight segment (x0,y0)→(x1,y1) using Bresenham.
/// Visual: round joins between pointer samples, no gaps when the mouse moves fast.
///
/// The segment is first clipped to the raster grown by the stamp radius, so only the
/// part that can leave ink is walked, however far off canvas the endpoints are.
pub fn stroke<S: Surface + ?Sized>(
    surface: &mut S,
    from: (i64, i64),
    to: (i64, i64),
    stamp: &Stamp,
    ink: Ink,
) {
    if surface.width() == 0 || surface.height() == 0 {
        return;
    }
    let r = stamp.radius as i64;
    let lo = (-r, -r);
    let hi = (surface.width() as i64 - 1 + r, surface.height() as i64 - 1 + r);
    let Some(((mut x0, mut y0), (x1, y1))) = clip_segment(from, to, lo, hi) else { return };

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        dab(surface, x0, y0, stamp, ink);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Liang-Barsky: the part of `from`→`to` inside the inclusive box `lo..=hi`, or `None`
/// when the segment misses it. Endpoints are rounded back onto the pixel grid.
fn clip_segment(
    from: (i64, i64),
    to: (i64, i64),
    lo: (i64, i64),
    hi: (i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let edges = [
        (-dx, x0 - lo.0 as f64),
        (dx, hi.0 as f64 - x0),
        (-dy, y0 - lo.1 as f64),
        (dy, hi.1 as f64 - y0),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: entirely outside or irrelevant.
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| {
        let x = (x0 + t * dx).round().clamp(lo.0 as f64, hi.0 as f64) as i64;
        let y = (y0 + t * dy).round().clamp(lo.1 as f64, hi.1 as f64) as i64;
        (x, y)
    };
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Raster;

    #[test]
    fn dab_clips_at_edges() {
        let mut r = Raster::blank(4, 4);
        let n = dab(&mut r, 0, 0, &Stamp::round(3), Ink::Paint(Rgb::BLACK));
        // Only the in-bounds quarter of the disc lands.
        assert!(n > 0 && n < Stamp::round(3).offsets.len());
        assert_eq!(r.pixel(0, 0), Some(Rgb::BLACK.opaque()));
    }

    #[test]
    fn stroke_has_no_gaps() {
        let mut r = Raster::blank(10, 10);
        stroke(&mut r, (0, 0), (9, 9), &Stamp::round(1), Ink::Paint(Rgb::RED));
        for i in 0..10 {
            assert_eq!(r.pixel(i, i), Some(Rgb::RED.opaque()), "gap at {i}");
        }
    }

    #[test]
    fn far_endpoints_are_clipped_before_walking() {
        let mut r = Raster::blank(10, 10);
        let tip = Stamp::round(1);
        stroke(&mut r, (5, 5), (i64::MAX, 5), &tip, Ink::Paint(Rgb::RED));
        for x in 5..10 {
            assert_eq!(r.pixel(x, 5), Some(Rgb::RED.opaque()));
        }
        assert_eq!(r.pixel(4, 5), Some(Rgb::WHITE.opaque()));

        // Crossing the whole canvas from far away on both sides.
        stroke(&mut r, (-20_000_000, 2), (20_000_000, 2), &tip, Ink::Paint(Rgb::BLACK));
        for x in 0..10 {
            assert_eq!(r.pixel(x, 2), Some(Rgb::BLACK.opaque()));
        }
    }

    #[test]
    fn segment_that_misses_the_canvas_paints_nothing() {
        let mut r = Raster::blank(10, 10);
        stroke(&mut r, (i64::MIN, -50), (i64::MAX, -50), &Stamp::round(5), Ink::Paint(Rgb::RED));
        stroke(&mut r, (-30, -30), (-30, 40), &Stamp::round(5), Ink::Paint(Rgb::RED));
        assert_eq!(r, Raster::blank(10, 10));
    }

    #[test]
    fn clip_keeps_inside_segments_untouched() {
        assert_eq!(clip_segment((1, 2), (7, 3), (0, 0), (9, 9)), Some(((1, 2), (7, 3))));
        assert_eq!(clip_segment((-10, 5), (19, 5), (0, 0), (9, 9)), Some(((0, 5), (9, 5))));
        assert_eq!(clip_segment((-10, -10), (-1, 20), (0, 0), (9, 9)), None);
    }

    #[test]
    fn eraser_makes_pixels_transparent() {
        let mut r = Raster::blank(5, 5);
        stroke(&mut r, (2, 0), (2, 4), &Stamp::round(1), Ink::Erase);
        assert_eq!(r.pixel(2, 3), Some(Rgba::TRANSPARENT));
        assert_eq!(r.pixel(1, 3), Some(Rgb::WHITE.opaque()));
    }
}

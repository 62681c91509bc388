// Pointer coordinates -> raster pixels.
// The window (or a browser canvas) may show the raster at a different size than its
// backing buffer; a click has to be scaled into buffer space before the bucket sees it.

/// Where the raster is drawn, in pointer units (window pixels, CSS pixels, ...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub display_width: f32,
    pub display_height: f32,
}

impl Viewport {
    /// Raster shown 1:1 at the window origin.
    pub fn identity(width: usize, height: usize) -> Self {
        Self { left: 0.0, top: 0.0, display_width: width as f32, display_height: height as f32 }
    }

    /// Scale a pointer position into raster pixels: `floor((p - origin) * raster / display)`.
    /// Not clamped, so a click beside the canvas maps beside the raster.
    pub fn to_raster(&self, px: f32, py: f32, raster_w: usize, raster_h: usize) -> (i64, i64) {
        if self.display_width <= 0.0 || self.display_height <= 0.0 {
            // Collapsed element: nothing on screen can be a valid pixel.
            return (-1, -1);
        }
        let sx = raster_w as f32 / self.display_width;
        let sy = raster_h as f32 / self.display_height;
        let x = ((px - self.left) * sx).floor() as i64;
        let y = ((py - self.top) * sy).floor() as i64;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_straight_through() {
        let v = Viewport::identity(300, 200);
        assert_eq!(v.to_raster(0.0, 0.0, 300, 200), (0, 0));
        assert_eq!(v.to_raster(299.9, 199.2, 300, 200), (299, 199));
    }

    #[test]
    fn scales_display_to_backing_store() {
        // 600x600 backing buffer shown in a 300x300 box offset by (10, 20).
        let v = Viewport { left: 10.0, top: 20.0, display_width: 300.0, display_height: 300.0 };
        assert_eq!(v.to_raster(10.0, 20.0, 600, 600), (0, 0));
        assert_eq!(v.to_raster(160.0, 170.0, 600, 600), (300, 300));
        assert_eq!(v.to_raster(160.4, 170.6, 600, 600), (300, 301));
    }

    #[test]
    fn off_canvas_stays_off_canvas() {
        let v = Viewport { left: 10.0, top: 10.0, display_width: 100.0, display_height: 100.0 };
        let (x, y) = v.to_raster(5.0, 200.0, 100, 100);
        assert!(x < 0);
        assert!(y >= 100);
        let collapsed = Viewport { display_width: 0.0, ..v };
        assert_eq!(collapsed.to_raster(50.0, 50.0, 100, 100), (-1, -1));
    }
}

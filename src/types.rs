// Core buffer types shared by the window, the brush and the bucket.

/// What the window shows each frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Precomputed round brush tip: every (dx, dy) offset inside the disc.
/// Visual: one "dab" of the brush or eraser, round like a canvas `lineCap = round`.
#[derive(Clone, Debug)]
pub struct Stamp {
    pub radius: i32,              // pixels from center to edge
    pub offsets: Vec<(i32, i32)>, // cells covered by the disc, relative to its center
}

impl Stamp {
    /// Build the disc for a brush `size` pixels across (size 1 = a single pixel).
    pub fn round(size: u32) -> Self {
        let size = size.max(1);
        let half = size as f32 / 2.0;
        let radius = half.ceil() as i32;
        let r2 = half * half;
        // Odd sizes center on a pixel; even sizes center on a pixel corner, so every
        // cell is sampled half a pixel toward the bottom-right.
        let center = if size % 2 == 0 { 0.5 } else { 0.0 };
        let mut offsets = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let (fx, fy) = (dx as f32 + center, dy as f32 + center);
                if fx * fx + fy * fy <= r2 || (dx == 0 && dy == 0) {
                    offsets.push((dx, dy));
                }
            }
        }
        Self { radius, offsets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_one_stamp_is_a_single_pixel() {
        let s = Stamp::round(1);
        assert_eq!(s.offsets, vec![(0, 0)]);
    }

    #[test]
    fn stamp_spans_exactly_its_size() {
        for size in 1..=12 {
            let s = Stamp::round(size);
            let min = s.offsets.iter().map(|o| o.0).min().unwrap();
            let max = s.offsets.iter().map(|o| o.0).max().unwrap();
            assert_eq!((max - min + 1) as u32, size, "size {size}");
            assert!(max <= s.radius && -min <= s.radius);
        }
        let mut two = Stamp::round(2).offsets;
        two.sort();
        assert_eq!(two, vec![(-1, -1), (-1, 0), (0, -1), (0, 0)]);
    }

    #[test]
    fn stamp_is_symmetric_and_round() {
        let s = Stamp::round(9);
        for &(dx, dy) in &s.offsets {
            assert!(s.offsets.contains(&(-dx, dy)));
            assert!(s.offsets.contains(&(dx, -dy)));
            assert!(s.offsets.contains(&(dy, dx)));
        }
        assert!(s.offsets.contains(&(4, 0)));
        // Corner of the bounding box is outside the disc.
        assert!(!s.offsets.contains(&(4, 4)));
    }
}

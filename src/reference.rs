// Faint reference picture under the drawing (line art to color in).
// Visual: the chosen picture appears centered at 30% strength on fresh paper and is
// stamped again on every reset.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::error::{Error, Result};
use crate::surface::{Raster, Surface};
use crate::color::Rgba;

/// Opacity used for the reference stamp.
pub const REFERENCE_OPACITY: f32 = 0.3;
/// Share of the canvas the picture may occupy along its limiting side.
pub const REFERENCE_FIT: f32 = 0.95;

/// Where the picture lands on the raster, in raster pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Fit `img_w × img_h` inside `canvas_w × canvas_h` at [`REFERENCE_FIT`], centered.
pub fn fit(img_w: u32, img_h: u32, canvas_w: usize, canvas_h: usize) -> Option<Placement> {
    if img_w == 0 || img_h == 0 || canvas_w == 0 || canvas_h == 0 {
        return None;
    }
    let scale = (canvas_w as f32 / img_w as f32).min(canvas_h as f32 / img_h as f32) * REFERENCE_FIT;
    let width = ((img_w as f32 * scale).round() as usize).clamp(1, canvas_w);
    let height = ((img_h as f32 * scale).round() as usize).clamp(1, canvas_h);
    Some(Placement { x: (canvas_w - width) / 2, y: (canvas_h - height) / 2, width, height })
}

/// Straight-alpha source-over of `src` (already scaled by `opacity`) onto `dst`.
fn source_over(dst: Rgba, src: Rgba, opacity: f32) -> Rgba {
    let sa = src.a as f32 / 255.0 * opacity;
    let da = dst.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let mix = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

pub struct ReferenceImage {
    image: RgbaImage,
}

impl ReferenceImage {
    /// Decode any format the `image` crate understands.
    pub fn open(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|source| Error::ImageLoad { path: path.to_path_buf(), source })?
            .to_rgba8();
        debug!(path = %path.display(), w = image.width(), h = image.height(), "reference image loaded");
        Ok(Self { image })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Draw the picture onto `raster`, scaled to fit and centered, at `opacity`.
    pub fn stamp(&self, raster: &mut Raster, opacity: f32) -> Option<Placement> {
        let place = fit(self.image.width(), self.image.height(), raster.width(), raster.height())?;
        let scaled = imageops::resize(&self.image, place.width as u32, place.height as u32, FilterType::Triangle);
        for (ix, iy, p) in scaled.enumerate_pixels() {
            let (x, y) = (place.x + ix as usize, place.y + iy as usize);
            if let Some(dst) = raster.pixel(x, y) {
                let src = Rgba::new(p[0], p[1], p[2], p[3]);
                raster.set_pixel(x, y, source_over(dst, src, opacity));
            }
        }
        Some(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as ImgRgba;

    #[test]
    fn fit_centers_and_keeps_aspect() {
        // 200x80 picture on a 100x100 canvas: width-limited.
        let p = fit(200, 80, 100, 100).unwrap();
        assert_eq!((p.width, p.height), (95, 38));
        assert_eq!((p.x, p.y), (2, 31));
        assert!(fit(0, 10, 100, 100).is_none());
    }

    #[test]
    fn black_line_art_becomes_faint_grey() {
        let art = RgbaImage::from_pixel(10, 10, ImgRgba([0, 0, 0, 255]));
        let reference = ReferenceImage::from_image(art);
        let mut raster = Raster::blank(40, 20);
        let place = reference.stamp(&mut raster, REFERENCE_OPACITY).unwrap();
        assert_eq!((place.x, place.y, place.width, place.height), (10, 0, 19, 19));
        let centre = raster.pixel(20, 10).unwrap();
        // 30% black over white: roughly 70% of 255, still opaque.
        assert!((178..=179).contains(&centre.r), "got {centre:?}");
        assert_eq!((centre.r, centre.a), (centre.b, 255));
        // Outside the placement the paper is untouched.
        assert_eq!(raster.pixel(0, 0), Some(Rgba::new(255, 255, 255, 255)));
    }

    #[test]
    fn transparent_picture_pixels_leave_paper_alone() {
        let art = RgbaImage::from_pixel(4, 4, ImgRgba([0, 0, 0, 0]));
        let mut raster = Raster::blank(8, 8);
        ReferenceImage::from_image(art).stamp(&mut raster, REFERENCE_OPACITY);
        assert_eq!(raster, Raster::blank(8, 8));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = ReferenceImage::open(Path::new("definitely/not/here.png")).err().unwrap();
        assert!(matches!(err, Error::ImageLoad { .. }));
    }
}

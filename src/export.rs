// "Save Drawing": write the canvas out as `<title>.png`.
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::error::{Error, Result};
use crate::surface::{Raster, Surface};

/// Turn a drawing title into a file stem. Keeps letters, digits, spaces, `-` and `_`;
/// falls back to `drawing` when nothing usable is left.
pub fn file_stem(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' { c } else { '_' })
        .collect();
    let trimmed = cleaned.trim().trim_matches('_');
    if trimmed.is_empty() { "drawing".to_string() } else { trimmed.to_string() }
}

/// Encode `raster` as an RGBA PNG at `path`.
pub fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    let fail = |reason: String| Error::ImageSave { path: path.to_path_buf(), reason };
    let img = RgbaImage::from_raw(raster.width() as u32, raster.height() as u32, raster.as_bytes().to_vec())
        .ok_or_else(|| fail("buffer does not match dimensions".into()))?;
    img.save_with_format(path, ImageFormat::Png).map_err(|e| fail(e.to_string()))?;
    info!(path = %path.display(), "drawing saved");
    Ok(())
}

/// Save into `dir` as `<file_stem(title)>.png` and return the full path.
pub fn save_titled(raster: &Raster, dir: &Path, title: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{}.png", file_stem(title)));
    save_png(raster, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_are_filesystem_safe() {
        assert_eq!(file_stem("My Cat"), "My Cat");
        assert_eq!(file_stem("a/b\\c:d"), "a_b_c_d");
        assert_eq!(file_stem("  "), "drawing");
        assert_eq!(file_stem("../"), "drawing");
    }
}

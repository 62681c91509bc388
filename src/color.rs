// Colors, the fixed crayon palette, and the per-channel match test used by the bucket.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Opaque color as three 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One raster pixel, straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same color at full opacity. Visual: what a filled or brushed pixel becomes.
    pub const fn opaque(self) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a: 255 }
    }

    /// Pack as 0x00RRGGBB for minifb.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(self) -> Rgb {
        Rgb { r: self.r, g: self.g, b: self.b }
    }
}

/// `#rrggbb`, lowercase, the same shape the palette is written in.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Parse `#rrggbb` (the leading `#` is optional, hex digits are case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// True when every channel differs by at most `tolerance`.
/// Per-channel (Chebyshev) distance on purpose; switching to Euclidean changes which pixels fill.
#[inline]
pub fn color_match(a: Rgb, b: Rgb, tolerance: u8) -> bool {
    a.r.abs_diff(b.r) <= tolerance && a.g.abs_diff(b.g) <= tolerance && a.b.abs_diff(b.b) <= tolerance
}

/// A named crayon in the palette popover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Rgb,
}

/// The ten crayons offered on the drawing page, in display order.
/// Keys 1..9 pick the first nine, key 0 picks White.
pub const PALETTE: [Swatch; 10] = [
    Swatch { name: "Black", color: Rgb::new(0x00, 0x00, 0x00) },
    Swatch { name: "Red", color: Rgb::new(0xFF, 0x00, 0x00) },
    Swatch { name: "Orange", color: Rgb::new(0xFF, 0x99, 0x00) },
    Swatch { name: "Yellow", color: Rgb::new(0xFF, 0xFF, 0x00) },
    Swatch { name: "Green", color: Rgb::new(0x00, 0xFF, 0x00) },
    Swatch { name: "Blue", color: Rgb::new(0x00, 0x00, 0xFF) },
    Swatch { name: "Purple", color: Rgb::new(0x99, 0x00, 0xFF) },
    Swatch { name: "Pink", color: Rgb::new(0xFF, 0x00, 0xFF) },
    Swatch { name: "Brown", color: Rgb::new(0x99, 0x66, 0x33) },
    Swatch { name: "White", color: Rgb::new(0xFF, 0xFF, 0xFF) },
];

/// Look up a crayon by name, ignoring case.
pub fn swatch_named(name: &str) -> Option<&'static Swatch> {
    PALETTE.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

/// A crayon name (`"brown"`) or a hex color (`"#996633"`).
pub fn parse_crayon(text: &str) -> Result<Rgb, Error> {
    match swatch_named(text.trim()) {
        Some(swatch) => Ok(swatch.color),
        None => text.trim().parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#ff9900".parse::<Rgb>().unwrap(), Rgb::new(0xFF, 0x99, 0x00));
        assert_eq!("996633".parse::<Rgb>().unwrap(), Rgb::new(0x99, 0x66, 0x33));
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#ff99001", "#gg0000", "#ff 900"] {
            assert!(matches!(bad.parse::<Rgb>(), Err(Error::InvalidColor(_))), "{bad:?} should fail");
        }
    }

    #[test]
    fn display_matches_palette_notation() {
        assert_eq!(Rgb::new(0x99, 0x00, 0xFF).to_string(), "#9900ff");
    }

    #[test]
    fn match_is_per_channel_not_euclidean() {
        let base = Rgb::new(100, 100, 100);
        // Every channel off by 10: Euclidean distance ~17, still a match at 10.
        assert!(color_match(base, Rgb::new(110, 90, 110), 10));
        // One channel off by 11 fails even though the others are identical.
        assert!(!color_match(base, Rgb::new(111, 100, 100), 10));
        assert!(color_match(Rgb::BLACK, Rgb::WHITE, 255));
        assert!(!color_match(Rgb::BLACK, Rgb::new(0, 0, 1), 0));
    }

    #[test]
    fn palette_has_ten_unique_crayons() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a.color, b.color, "{} and {} share a color", a.name, b.name);
            }
        }
        assert_eq!(swatch_named("brown").map(|s| s.color), Some(Rgb::new(0x99, 0x66, 0x33)));
        assert!(swatch_named("teal").is_none());
    }

    #[test]
    fn crayon_names_and_hex_both_work() {
        assert_eq!(parse_crayon("Pink").unwrap(), Rgb::new(0xFF, 0x00, 0xFF));
        assert_eq!(parse_crayon(" #00ff00 ").unwrap(), Rgb::new(0x00, 0xFF, 0x00));
        assert!(matches!(parse_crayon("teal"), Err(Error::InvalidColor(_))));
    }
}

// Paint bucket coloring canvas.
// A small drawing surface for young learners: brush, eraser and a paint bucket over
// a faint reference picture. The library holds the raster, the flood-fill engine and
// the session model; `main.rs` hosts it in a `minifb` window.

pub mod brush;
pub mod color;
pub mod config;
pub mod coords;
pub mod draw;
pub mod error;
pub mod export;
pub mod fill;
pub mod reference;
pub mod session;
pub mod surface;
pub mod types;

pub use color::{Rgb, Rgba};
pub use error::{Error, Result};
pub use fill::{flood_fill, FillReport, PixelRect};
pub use session::{DrawingSession, Tool};
pub use surface::{Raster, Surface};

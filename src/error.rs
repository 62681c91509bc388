// One error type for the whole crate.
// Every variant states *where* things went wrong.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the frame to the window failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// The reference picture could not be opened or decoded.
    #[error("Reference image error ({path}): {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Writing the finished drawing failed.
    #[error("Export error ({path}): {reason}")]
    ImageSave { path: PathBuf, reason: String },

    /// Reading or parsing the config file failed.
    #[error("Config error: {0}")]
    Config(String),

    /// A color string was not `#rrggbb`.
    #[error("Invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),
}

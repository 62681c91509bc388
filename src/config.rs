// Command-line arguments and the optional `paint-bucket.toml` file.
// Precedence: CLI flag > config file > built-in default. A missing config file is
// fine; a config file that exists but does not parse is an error.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::error::{Error, Result};
use crate::session::{DEFAULT_TOLERANCE, MAX_TOLERANCE};

pub const DEFAULT_CONFIG_FILE: &str = "paint-bucket.toml";

/// Command-line arguments for the paint-bucket window.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "paint-bucket")]
#[command(about = "Coloring canvas with brush, eraser and paint bucket")]
#[command(version)]
pub struct CliArgs {
    /// Config file (TOML). Defaults to ./paint-bucket.toml when present.
    #[arg(long, env = "PAINT_BUCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Picture to color in, stamped faintly under the drawing
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Drawing title, also used as the saved file name
    #[arg(long)]
    pub title: Option<String>,

    /// Where "save" writes the PNG
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Starting fill tolerance (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_TOLERANCE as i64))]
    pub tolerance: Option<u8>,

    /// Starting crayon: a palette name like "brown" or a hex color like "#996633"
    #[arg(long)]
    pub color: Option<String>,
}

/// Shape of `paint-bucket.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub reference: Option<PathBuf>,
    pub title: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub tolerance: Option<u8>,
    pub color: Option<String>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {e}")))
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::parse(&content).map(Some)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    pub reference: Option<PathBuf>,
    pub title: String,
    pub output_dir: PathBuf,
    pub tolerance: u8,
    pub color: Rgb,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            reference: None,
            title: "drawing".to_string(),
            output_dir: PathBuf::from("."),
            tolerance: DEFAULT_TOLERANCE,
            color: Rgb::BLACK,
        }
    }
}

impl AppConfig {
    /// Layer CLI flags over the file over defaults.
    pub fn merge(args: &CliArgs, file: Option<FileConfig>) -> Result<Self> {
        let file = file.unwrap_or_default();
        let d = AppConfig::default();
        let color = match args.color.as_deref().or(file.color.as_deref()) {
            Some(text) => color::parse_crayon(text)?,
            None => d.color,
        };
        let config = Self {
            width: args.width.or(file.width).unwrap_or(d.width),
            height: args.height.or(file.height).unwrap_or(d.height),
            reference: args.reference.clone().or(file.reference),
            title: args.title.clone().or(file.title).unwrap_or(d.title),
            output_dir: args.output_dir.clone().or(file.output_dir).unwrap_or(d.output_dir),
            tolerance: args.tolerance.or(file.tolerance).unwrap_or(d.tolerance),
            color,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read the config file named by `--config` (or the default one) and merge.
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => Some(
                FileConfig::load(path)?
                    .ok_or_else(|| Error::Config(format!("Config file not found: {}", path.display())))?,
            ),
            None => FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        Self::merge(args, file)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!("canvas size must be non-zero, got {}x{}", self.width, self.height)));
        }
        if self.tolerance > MAX_TOLERANCE {
            return Err(Error::Config(format!("tolerance must be 0-{MAX_TOLERANCE}, got {}", self.tolerance)));
        }
        Ok(())
    }
}

//! Configuration for the `jpeg-meta` command-line tool.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `JPEG_META_` prefix:
//!
//! - `JPEG_META_FORMAT` - Output format, `json` or `pretty` (default: json)
//! - `JPEG_META_RAW` - Print raw tag ids instead of names (default: false)
//! - `JPEG_META_NO_EXIF` / `JPEG_META_NO_IPTC` / `JPEG_META_NO_XMP` - Skip a family
//! - `JPEG_META_THUMBNAIL_DIR` - Directory to write extracted thumbnails into
//!
//! # Example
//!
//! ```ignore
//! use jpeg_meta::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//! let options = config.read_options();
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::metadata::ReadOptions;

// =============================================================================
// Output Format
// =============================================================================

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON document per file
    #[default]
    Json,

    /// One `Name : value` line per tag
    Pretty,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// jpeg-meta - Extract EXIF, IPTC and XMP metadata from JPEG files.
///
/// Reads each file into memory and prints the embedded metadata. Files
/// without metadata produce empty results rather than errors.
#[derive(Parser, Debug, Clone)]
#[command(name = "jpeg-meta")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG files to inspect.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    // =========================================================================
    // Output Configuration
    // =========================================================================
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, env = "JPEG_META_FORMAT")]
    pub format: OutputFormat,

    /// Print raw EXIF tags keyed by id instead of translated names.
    #[arg(long, default_value_t = false, env = "JPEG_META_RAW")]
    pub raw: bool,

    /// Write each extracted JPEG thumbnail into this directory.
    ///
    /// Files are named after the source file with a `.thumb.jpg` suffix.
    #[arg(long, env = "JPEG_META_THUMBNAIL_DIR")]
    pub thumbnail_dir: Option<PathBuf>,

    // =========================================================================
    // Family Selection
    // =========================================================================
    /// Skip EXIF extraction.
    #[arg(long, default_value_t = false, env = "JPEG_META_NO_EXIF")]
    pub no_exif: bool,

    /// Skip IPTC extraction.
    #[arg(long, default_value_t = false, env = "JPEG_META_NO_IPTC")]
    pub no_iptc: bool,

    /// Skip XMP extraction.
    #[arg(long, default_value_t = false, env = "JPEG_META_NO_XMP")]
    pub no_xmp: bool,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one input file is required".to_string());
        }

        if let Some(ref dir) = self.thumbnail_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Thumbnail directory does not exist or is not a directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Families to extract.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            exif: !self.no_exif,
            iptc: !self.no_iptc,
            xmp: !self.no_xmp,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! jpeg-meta - Print the EXIF, IPTC and XMP metadata of JPEG files.
//!
//! Each file is read fully into memory, parsed, and printed as JSON or as
//! `Name : value` text.

use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_meta::{
    config::{Config, OutputFormat},
    format::{ExifData, IptcFieldMap, XmpNode},
    metadata::{read_metadata, Metadata, ReadOptions},
    report::pretty_metadata,
    translate::{HumanTags, Translator},
};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let options = config.read_options();
    let translator = Translator::default();
    let mut failed = 0usize;

    for path in &config.files {
        if let Err(e) = process_file(&config, &options, &translator, path) {
            error!("{}: {}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        info!("{} of {} file(s) failed", failed, config.files.len());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Per-file Processing
// =============================================================================

/// Exif section of a JSON report.
#[derive(Serialize)]
#[serde(untagged)]
enum ExifReport<'a> {
    Raw(&'a ExifData),
    Translated(HumanTags),
}

/// JSON document printed for one file.
#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    exif: Option<ExifReport<'a>>,
    iptc: &'a IptcFieldMap,
    xmp: Option<&'a XmpNode>,
}

fn process_file(
    config: &Config,
    options: &ReadOptions,
    translator: &Translator,
    path: &Path,
) -> Result<(), String> {
    let data = std::fs::read(path).map_err(|e| format!("failed to read file: {}", e))?;
    debug!(file = %path.display(), size = data.len(), "read file");

    let metadata = read_metadata(&data, options);
    let human = if config.raw {
        None
    } else {
        metadata.exif.as_ref().map(|exif| translator.translate(exif))
    };

    match config.format {
        OutputFormat::Json => {
            let report = FileReport {
                file: path.display().to_string(),
                exif: match (&metadata.exif, human) {
                    (_, Some(tags)) => Some(ExifReport::Translated(tags)),
                    (Some(exif), None) => Some(ExifReport::Raw(exif)),
                    (None, None) => None,
                },
                iptc: &metadata.iptc,
                xmp: metadata.xmp.as_ref(),
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("failed to serialize metadata: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Pretty => {
            println!("== {} ==", path.display());
            print!("{}", pretty_metadata(&metadata, human.as_ref()));
        }
    }

    if let Some(ref dir) = config.thumbnail_dir {
        write_thumbnail(&metadata, path, dir)?;
    }

    Ok(())
}

/// Write the JPEG thumbnail of `metadata`, if any, as `<stem>.thumb.jpg`.
fn write_thumbnail(metadata: &Metadata, source: &Path, dir: &Path) -> Result<(), String> {
    let image = match metadata
        .exif
        .as_ref()
        .and_then(|exif| exif.thumbnail.as_ref())
        .and_then(|thumb| thumb.image.as_ref())
    {
        Some(image) => image,
        None => {
            debug!(file = %source.display(), "no JPEG thumbnail to write");
            return Ok(());
        }
    };

    let target = thumbnail_path(source, dir);
    std::fs::write(&target, &image.data)
        .map_err(|e| format!("failed to write {}: {}", target.display(), e))?;
    info!(
        "Wrote {} byte thumbnail to {}",
        image.data.len(),
        target.display()
    );

    Ok(())
}

fn thumbnail_path(source: &Path, dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    dir.join(format!("{}.thumb.jpg", stem))
}

// =============================================================================
// Logging
// =============================================================================

/// Initialize the tracing subscriber on stderr, leaving stdout to results.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "jpeg_meta=debug"
    } else {
        "jpeg_meta=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

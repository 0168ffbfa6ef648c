//! plate-blobs CLI: detect colored plates in one image and write a JSON report.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use image::{ImageReader, RgbImage};
use log::{info, warn, LevelFilter};
use plate_blobs::core::{Mask, OrientedRect};
use plate_blobs::detect::{self, mask_image};
use plate_blobs::detector::{DiagnosticSink, PlateDetectorParams};
use serde::Serialize;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "plate-blobs")]
#[command(about = "Detect colored target plates and their headings in an RGB image")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    image: PathBuf,

    /// Detector parameters (JSON). Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the JSON report. Printed to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for diagnostic PNGs (mask.png, contours.png, rects.png).
    /// Enables all three when the config enables none.
    #[arg(long)]
    debug_dir: Option<PathBuf>,

    /// Log level for the stderr logger. With the `tracing` feature, use `RUST_LOG`.
    #[arg(long, default_value = "info")]
    #[cfg_attr(feature = "tracing", allow(dead_code))]
    log_level: LevelFilter,
}

#[derive(Debug, Serialize)]
struct DetectionReport {
    image_path: String,
    width: u32,
    height: u32,
    detections: Vec<OrientedRect>,
    error: Option<String>,
}

/// Writes each diagnostic image into a directory; failures are logged only.
struct PngSink {
    dir: PathBuf,
}

impl PngSink {
    fn save<F>(&self, name: &str, write: F)
    where
        F: FnOnce(&Path) -> image::ImageResult<()>,
    {
        let path = self.dir.join(name);
        match write(&path) {
            Ok(()) => info!("wrote {}", path.display()),
            Err(e) => warn!("failed to write {}: {e}", path.display()),
        }
    }
}

impl DiagnosticSink for PngSink {
    fn mask(&mut self, mask: &Mask) {
        self.save("mask.png", |p| mask_image(mask).save(p));
    }

    fn contours(&mut self, overlay: &RgbImage) {
        self.save("contours.png", |p| overlay.save(p));
    }

    fn rects(&mut self, overlay: &RgbImage) {
        self.save("rects.png", |p| overlay.save(p));
    }
}

fn load_params(path: Option<&Path>) -> CliResult<PlateDetectorParams> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(p)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(PlateDetectorParams::default()),
    }
}

fn write_report(report: &DetectionReport, output: Option<&Path>) -> CliResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(p) => {
            fs::write(p, json)?;
            info!("report written to {}", p.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run(cli: Cli) -> CliResult<()> {
    #[cfg(feature = "tracing")]
    plate_blobs::core::init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    plate_blobs::core::init_with_level(cli.log_level)?;

    let mut params = load_params(cli.config.as_deref())?;
    let img = ImageReader::open(&cli.image)?.decode()?.to_rgb8();

    let mut png_sink = None;
    if let Some(dir) = &cli.debug_dir {
        fs::create_dir_all(dir)?;
        let toggles = &mut params.debug;
        if !(toggles.mask || toggles.contours || toggles.rects) {
            toggles.mask = true;
            toggles.contours = true;
            toggles.rects = true;
        }
        png_sink = Some(PngSink { dir: dir.clone() });
    }

    let result = match png_sink.as_mut() {
        Some(sink) => detect::detect_plates_with_sink(&img, params, sink),
        None => detect::detect_plates(&img, params),
    };

    let (detections, error) = match result {
        Ok(d) => (d, None),
        // parameter errors are configuration mistakes, not per-image results
        Err(e @ detect::DetectError::Params(_)) => return Err(e.into()),
        Err(e) => (Vec::new(), Some(e)),
    };
    info!("{} plates in {}", detections.len(), cli.image.display());

    let report = DetectionReport {
        image_path: cli.image.display().to_string(),
        width: img.width(),
        height: img.height(),
        detections,
        error: error.as_ref().map(ToString::to_string),
    };
    write_report(&report, cli.output.as_deref())?;

    match error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

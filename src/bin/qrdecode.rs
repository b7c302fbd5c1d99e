use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use heic_bridge::image_pipeline::{QrScanPipeline, Region};
use heic_bridge::logger;

/// Decode the QR code in an image (PNG, JPEG, HEIC, HEIF, ...).
#[derive(Parser, Debug)]
#[command(name = "qrdecode", version)]
struct Cli {
    /// Path to the QR code image
    image: PathBuf,

    /// Only look inside this rectangle, given as x1,y1,x2,y2 in pixels
    #[arg(long)]
    region: Option<Region>,
}

fn decode_qr_code(image: &Path, region: Option<Region>) -> anyhow::Result<Option<String>> {
    let pipeline = QrScanPipeline::new();
    let payload = match region {
        Some(region) => pipeline.scan_region(image, region),
        None => pipeline.scan_file(image),
    };
    payload.with_context(|| format!("could not scan {}", image.display()))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };

    logger::init();

    // Scan failures are reported but never change the exit status
    match decode_qr_code(&cli.image, cli.region) {
        Ok(Some(data)) => println!("Decoded Data: {}", data),
        Ok(None) => println!("No QR code found in the image"),
        Err(e) => eprintln!("Error: {:#}", e),
    }

    ExitCode::SUCCESS
}

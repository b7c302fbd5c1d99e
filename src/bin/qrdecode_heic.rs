use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use heic_bridge::image_pipeline::{HeifBridge, QrDetector, RqrrDetector};
use heic_bridge::logger::{self, debug};

const INPUT: &str = "./qrcode.heic";

/// Decode the QR code in ./qrcode.heic.
///
/// Extra arguments are ignored; only --help and --version are honoured.
#[derive(Parser, Debug)]
#[command(name = "qrdecode-heic", version, ignore_errors = true)]
struct Cli {}

fn main() -> ExitCode {
    if let Err(e) = Cli::try_parse() {
        let _ = e.print();
        return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
    }

    logger::init();

    // The pixels are copied out before the codec objects are released
    let image = match HeifBridge::new().decode(Path::new(INPUT)) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error reading HEIC file: {}", e);
            eprintln!("Could not open or find the image!");
            return ExitCode::from(255);
        }
    };
    debug!("Decoded {}x{} from {}", image.width, image.height, INPUT);

    let luma = match image.into_rgb_image() {
        Ok(rgb) => image::DynamicImage::ImageRgb8(rgb).to_luma8(),
        Err(e) => {
            eprintln!("Error accessing image data: {}", e);
            eprintln!("Could not open or find the image!");
            return ExitCode::from(255);
        }
    };

    match RqrrDetector.detect_and_decode(&luma) {
        Some(data) => println!("Decoded data: {}", data),
        None => println!("QR Code not detected"),
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_arguments_are_ignored() {
        assert!(Cli::try_parse_from(["qrdecode-heic", "other.heic", "--verbose"]).is_ok());
    }

    #[test]
    fn test_help_still_exits_cleanly() {
        let e = Cli::try_parse_from(["qrdecode-heic", "--help"]).unwrap_err();
        assert!(!e.use_stderr());
    }
}

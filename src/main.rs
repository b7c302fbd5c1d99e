use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use heic_bridge::image_pipeline::{ConversionConfig, HeicToPngPipeline, PngCompression};
use heic_bridge::logger::{self, debug, info};

/// Convert a HEIC/HEIF image to PNG.
///
/// The output is written next to the input, with the first ".heic" in the
/// path replaced by ".png".
#[derive(Parser, Debug)]
#[command(name = "heic2png", version)]
struct Cli {
    /// Input HEIC file
    input: PathBuf,

    /// PNG compression level
    #[arg(long, value_enum, default_value_t = PngCompression::Default)]
    compression: PngCompression,
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

    info!("Starting heic2png...");

    let config = ConversionConfig::builder()
        .compression(cli.compression)
        .build();
    let pipeline = HeicToPngPipeline::new(config);

    debug!("Compression: {:?}", pipeline.config().compression);

    match pipeline.convert_to_png(&cli.input) {
        Ok(output) => {
            info!(output = %output.display(), "Conversion successful!");
            println!("Conversion successful");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Conversion failed");
            ExitCode::from(1)
        }
    }
}

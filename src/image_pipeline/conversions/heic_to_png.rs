use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    heif::{HeicImageReader, HeifBridge},
    png::{ConversionConfig, PngWriter, StandardPngWriter},
};

const HEIC_MARKER: &[u8] = b".heic";

/// Output path for `input`: the first `.heic` (case-sensitive) becomes `.png`.
///
/// Works on the raw path bytes, so non-UTF-8 paths are renamed too. Paths
/// without that exact substring, including `.HEIC` and `.heif`, come back
/// unchanged, so converting them overwrites the input.
pub fn png_output_path(input: &Path) -> PathBuf {
    let bytes = input.as_os_str().as_encoded_bytes();
    let Some(at) = bytes
        .windows(HEIC_MARKER.len())
        .position(|window| window == HEIC_MARKER)
    else {
        return input.to_path_buf();
    };

    let mut renamed = Vec::with_capacity(bytes.len() - 1);
    renamed.extend_from_slice(&bytes[..at]);
    renamed.extend_from_slice(b".png");
    renamed.extend_from_slice(&bytes[at + HEIC_MARKER.len()..]);

    // SAFETY: the bytes are split and joined only around ASCII text, which
    // keeps every piece a valid encoded OS string
    PathBuf::from(unsafe { OsString::from_encoded_bytes_unchecked(renamed) })
}

pub struct HeicToPngPipeline<R: HeicImageReader, W: PngWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl HeicToPngPipeline<HeifBridge, StandardPngWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: HeifBridge::new(),
            writer: StandardPngWriter,
            config,
        }
    }
}

impl<R: HeicImageReader, W: PngWriter> HeicToPngPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    #[instrument(skip(self, input_path, output), fields(input = %input_path.display()))]
    pub fn convert(&self, input_path: &Path, output: &mut dyn Write) -> Result<()> {
        info!("Starting HEIC to PNG conversion");

        let image = {
            let _span = tracing::info_span!("decode_heic").entered();
            self.reader.read_heic(input_path)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width,
                height = image.height
            ).entered();
            self.validate_dimensions(image.width, image.height)?;
        }

        {
            let _span = tracing::info_span!("encode_png").entered();
            self.writer.write_png(&image, output, &self.config)?;
        }

        info!(
            width = image.width,
            height = image.height,
            "Conversion complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        // Decode fully before touching the output, which may be the input itself
        let image = {
            let _span = tracing::info_span!("decode_heic").entered();
            self.reader.read_heic(input_path)?
        };
        self.validate_dimensions(image.width, image.height)?;

        let output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        let mut output = BufWriter::new(output_file);
        {
            let _span = tracing::info_span!("encode_png").entered();
            self.writer.write_png(&image, &mut output, &self.config)?;
        }
        output.flush().map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }

    /// Converts `input_path` next to itself, named by [`png_output_path`].
    ///
    /// Returns the path written.
    pub fn convert_to_png<P: AsRef<Path>>(&self, input_path: P) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let output_path = png_output_path(input_path);

        if output_path == input_path {
            warn!(
                path = %input_path.display(),
                "No \".heic\" in input path, the PNG will overwrite the input"
            );
        }

        self.convert_file(input_path, &output_path)?;
        Ok(output_path)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

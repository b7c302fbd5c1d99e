//! PNG conversion configuration types

use clap::ValueEnum;

/// PNG compression levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PngCompression {
    /// Encoder default (balanced speed and size)
    #[default]
    Default,
    /// Fast compression (larger file)
    Fast,
    /// Best compression (slower)
    Best,
}

impl From<PngCompression> for png::Compression {
    fn from(compression: PngCompression) -> Self {
        match compression {
            PngCompression::Default => png::Compression::Default,
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

/// Configuration for HEIC to PNG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Compression level to use
    pub compression: PngCompression,
    /// Whether to reject zero-sized images before encoding
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression: PngCompression::Default,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    compression: Option<PngCompression>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}

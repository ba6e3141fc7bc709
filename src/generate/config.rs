use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{MASK_PALETTE, OutputSize};
use crate::foundation::error::{MaskforgeError, MaskforgeResult};

/// Encoding of composite images. Masks are always PNG.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG composites (default).
    #[default]
    Jpeg,
    /// PNG composites (lossless).
    Png,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MaskforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            other => Err(MaskforgeError::validation(format!(
                "unsupported output type '{other}' (expected png, jpg, or jpeg)"
            ))),
        }
    }
}

/// Validated parameters for one generation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Output width in pixels, at least 64.
    pub width: u32,
    /// Output height in pixels, at least 64.
    pub height: u32,
    /// Number of samples to generate, greater than zero.
    pub count: u64,
    /// Upper bound on foregrounds per sample, `1..=` palette length.
    #[serde(default = "default_max_foregrounds")]
    pub max_foregrounds: usize,
    /// Encoding of composite images.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Zero-padding width of sequential filenames, independent of `count`.
    #[serde(default = "default_zero_padding")]
    pub zero_padding: usize,
    /// RNG seed; a random seed is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_foregrounds() -> usize {
    3
}

// 8 digits supports up to 100 million samples.
fn default_zero_padding() -> usize {
    8
}

impl GenerateConfig {
    /// Construct with defaults for everything beyond size and count.
    pub fn new(width: u32, height: u32, count: u64) -> Self {
        Self {
            width,
            height,
            count,
            max_foregrounds: default_max_foregrounds(),
            output_format: OutputFormat::default(),
            zero_padding: default_zero_padding(),
            seed: None,
        }
    }

    /// Check all run parameters before any image work happens.
    pub fn validate(&self) -> MaskforgeResult<()> {
        self.output_size()?;
        if self.count == 0 {
            return Err(MaskforgeError::validation("count must be > 0"));
        }
        if self.max_foregrounds == 0 || self.max_foregrounds > MASK_PALETTE.len() {
            return Err(MaskforgeError::validation(format!(
                "max_foregrounds must be in 1..={}, got {}",
                MASK_PALETTE.len(),
                self.max_foregrounds
            )));
        }
        if self.zero_padding == 0 {
            return Err(MaskforgeError::validation("zero_padding must be > 0"));
        }
        Ok(())
    }

    /// Validated output dimensions.
    pub fn output_size(&self) -> MaskforgeResult<OutputSize> {
        OutputSize::new(self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;

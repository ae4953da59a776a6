//! Layout configuration.
//!
//! Every size the pipeline uses can be overridden from a TOML file. The file
//! is optional: without one, the stock defaults below are used. It is read
//! from `pics-layout.toml` in the working directory, or from the path given
//! with `--config`. The tool never writes it.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [resample]
//! long_edge = 4000        # Long edge of each resampled input
//!
//! [border]
//! cell_size = 4200        # Side of each white square (and grid cell)
//!
//! [finish]
//! long_edge = 10000       # Approximate long edge of the framed result
//! min_border = 200        # Frame thickness for wide grids
//! max_border = 1000       # Frame thickness for narrow grids
//! min_columns = 2         # At or below: max_border
//! max_columns = 10        # At or above: min_border
//!
//! [output]
//! quality = 95            # JPEG quality (1-100)
//! default_prefix = "output"
//!
//! [selection]
//! max_images = 100        # Largest accepted selection
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::{
    BorderScale, FrameConfig, GridConfig, Quality, ResampleConfig, SquareConfig,
    calculate_grid_shape,
};
use crate::naming::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "pics-layout.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Layout configuration loaded from TOML.
///
/// All fields have defaults; a config file only lists what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub resample: ResampleSection,
    pub border: BorderSection,
    pub finish: FinishSection,
    pub output: OutputSection,
    pub selection: SelectionSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResampleSection {
    /// Long edge of each resampled input, in pixels.
    pub long_edge: u32,
}

impl Default for ResampleSection {
    fn default() -> Self {
        Self { long_edge: 4000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BorderSection {
    /// Side of the white square around each image; also the grid cell size.
    pub cell_size: u32,
}

impl Default for BorderSection {
    fn default() -> Self {
        Self { cell_size: 4200 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinishSection {
    pub long_edge: u32,
    pub min_border: u32,
    pub max_border: u32,
    pub min_columns: u32,
    pub max_columns: u32,
}

impl Default for FinishSection {
    fn default() -> Self {
        let scale = BorderScale::default();
        Self {
            long_edge: 10000,
            min_border: scale.min_border,
            max_border: scale.max_border,
            min_columns: scale.min_columns,
            max_columns: scale.max_columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// JPEG quality for every written file.
    pub quality: u32,
    /// Prefix used when none is given.
    pub default_prefix: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            quality: 95,
            default_prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionSection {
    pub max_images: usize,
}

impl Default for SelectionSection {
    fn default() -> Self {
        Self { max_images: 100 }
    }
}

impl LayoutConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.resample.long_edge == 0 || self.border.cell_size == 0 || self.finish.long_edge == 0
        {
            return Err(ConfigError::Validation(
                "resample.long_edge, border.cell_size and finish.long_edge must be non-zero"
                    .into(),
            ));
        }
        if self.finish.min_border > self.finish.max_border {
            return Err(ConfigError::Validation(
                "finish.min_border must not exceed finish.max_border".into(),
            ));
        }
        if self.finish.min_columns >= self.finish.max_columns {
            return Err(ConfigError::Validation(
                "finish.min_columns must be less than finish.max_columns".into(),
            ));
        }
        let frame_total = self.finish.max_border.checked_mul(2);
        if frame_total.is_none_or(|total| self.finish.long_edge <= total) {
            return Err(ConfigError::Validation(
                "finish.long_edge must be larger than twice finish.max_border".into(),
            ));
        }
        if self.selection.max_images == 0 {
            return Err(ConfigError::Validation(
                "selection.max_images must be at least 1".into(),
            ));
        }
        // The largest selection must still give a canvas that fits in u32.
        let widest = calculate_grid_shape(self.selection.max_images);
        if widest.canvas_size(self.border.cell_size).is_none() {
            return Err(ConfigError::Validation(format!(
                "border.cell_size {} is too large for a {}x{} grid",
                self.border.cell_size, widest.columns, widest.rows
            )));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }

    pub fn resample_config(&self) -> ResampleConfig {
        ResampleConfig {
            long_edge: self.resample.long_edge,
            quality: self.quality(),
        }
    }

    pub fn square_config(&self) -> SquareConfig {
        SquareConfig {
            size: self.border.cell_size,
            quality: self.quality(),
        }
    }

    /// Grid cells are the bordered squares, so the cell size is shared.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            cell_size: self.border.cell_size,
            quality: self.quality(),
        }
    }

    pub fn border_scale(&self) -> BorderScale {
        BorderScale {
            min_border: self.finish.min_border,
            max_border: self.finish.max_border,
            min_columns: self.finish.min_columns,
            max_columns: self.finish.max_columns,
        }
    }

    pub fn frame_config(&self, border: u32) -> FrameConfig {
        FrameConfig {
            long_edge: self.finish.long_edge,
            border,
            quality: self.quality(),
        }
    }
}

/// Parse and validate a config from TOML text.
pub fn parse_config(content: &str) -> Result<LayoutConfig, ConfigError> {
    let config: LayoutConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<LayoutConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load `pics-layout.toml` from `dir`, or the defaults when it is absent.
pub fn load_config(dir: &Path) -> Result<LayoutConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        load_config_file(&path)
    } else {
        Ok(LayoutConfig::default())
    }
}

/// Stock config with every option documented.
pub fn stock_config_toml() -> &'static str {
    r#"# pics-layout configuration
# Every option is optional; the values below are the defaults.

[resample]
# Long edge of each resampled input image, in pixels.
long_edge = 4000

[border]
# Side of the white square each image is centered on.
# Also the size of one grid cell in the collage.
cell_size = 4200

[finish]
# Approximate long edge of the framed collage, frame included.
long_edge = 10000
# Frame thickness falls linearly from max_border (at min_columns or fewer
# grid columns) to min_border (at max_columns or more).
min_border = 200
max_border = 1000
min_columns = 2
max_columns = 10

[output]
# JPEG quality for every written file (1-100).
quality = 95
# Filename prefix when none is given.
default_prefix = "output"

[selection]
# Largest number of images accepted in one run.
max_images = 100
"#
}

//! Generator configuration via TOML files.
//!
//! Every key is optional; missing keys fall back to the demo stimulus
//! (128 px period, 45°, 30 px sweep, sine, 24x64, 30 frames).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GratingError;
use crate::grating::SequenceParams;
use crate::waveform::Waveform;

/// Top-level configuration loaded from a TOML file.
///
/// # Examples
///
/// ```
/// use grating_core::GratingConfig;
///
/// let config = GratingConfig::from_str("[grating]\nwaveform = \"sqr\"\nframes = 4").unwrap();
/// assert_eq!(config.sequence.frames, 4);
/// assert_eq!(config.sequence.rows, 24);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GratingConfig {
    /// Stimulus parameters, from the `[grating]` table
    pub sequence: SequenceParams,
    /// Contact sheet layout, from the `[render]` table
    pub render: RenderConfig,
}

impl GratingConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let sequence = SequenceParams {
            spatial_frequency: raw.grating.spatial_frequency,
            orientation: raw.grating.orientation,
            velocity: raw.grating.velocity,
            waveform: raw.grating.waveform,
            rows: raw.grating.rows,
            cols: raw.grating.cols,
            frames: raw.grating.frames,
        };
        sequence.validate()?;

        let render = RenderConfig::try_from(&raw.render)?;

        Ok(Self { sequence, render })
    }
}

impl Default for GratingConfig {
    fn default() -> Self {
        let grating = RawGrating::default();
        Self {
            sequence: SequenceParams {
                spatial_frequency: grating.spatial_frequency,
                orientation: grating.orientation,
                velocity: grating.velocity,
                waveform: grating.waveform,
                rows: grating.rows,
                cols: grating.cols,
                frames: grating.frames,
            },
            render: RenderConfig::default(),
        }
    }
}

/// Layout of the contact sheet written by the demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderConfig {
    /// Tiles per row of the sheet
    pub columns: usize,
    /// Black pixels between tiles
    pub gutter: u32,
    pub output: PathBuf,
}

impl RenderConfig {
    fn try_from(raw: &RawRender) -> Result<Self, ConfigError> {
        if raw.columns == 0 {
            return Err(GratingError::invalid_parameter("render.columns", raw.columns, "≥ 1")
                .into());
        }
        if raw.output.as_os_str().is_empty() {
            return Err(GratingError::invalid_parameter(
                "render.output",
                raw.output.display(),
                "a non-empty path",
            )
            .into());
        }

        Ok(Self {
            columns: raw.columns,
            gutter: raw.gutter,
            output: raw.output.clone(),
        })
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let raw = RawRender::default();
        Self {
            columns: raw.columns,
            gutter: raw.gutter,
            output: raw.output,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    grating: RawGrating,
    #[serde(default)]
    render: RawRender,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGrating {
    #[serde(default = "default_spatial_frequency")]
    spatial_frequency: f64,
    #[serde(default = "default_orientation")]
    orientation: f64,
    #[serde(default = "default_velocity")]
    velocity: f64,
    #[serde(default)]
    waveform: Waveform,
    #[serde(default = "default_rows")]
    rows: usize,
    #[serde(default = "default_cols")]
    cols: usize,
    #[serde(default = "default_frames")]
    frames: usize,
}

impl Default for RawGrating {
    fn default() -> Self {
        Self {
            spatial_frequency: default_spatial_frequency(),
            orientation: default_orientation(),
            velocity: default_velocity(),
            waveform: Waveform::default(),
            rows: default_rows(),
            cols: default_cols(),
            frames: default_frames(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRender {
    #[serde(default = "default_columns")]
    columns: usize,
    #[serde(default = "default_gutter")]
    gutter: u32,
    #[serde(default = "default_output")]
    output: PathBuf,
}

impl Default for RawRender {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            gutter: default_gutter(),
            output: default_output(),
        }
    }
}

fn default_spatial_frequency() -> f64 {
    128.0
}

fn default_orientation() -> f64 {
    45.0
}

fn default_velocity() -> f64 {
    30.0
}

fn default_rows() -> usize {
    24
}

fn default_cols() -> usize {
    64
}

fn default_frames() -> usize {
    30
}

fn default_columns() -> usize {
    10
}

fn default_gutter() -> u32 {
    2
}

fn default_output() -> PathBuf {
    PathBuf::from("out/gratings.png")
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(GratingError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
            ConfigError::Invalid(err) => write!(f, "Invalid grating: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Invalid(err) => Some(err),
            ConfigError::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<GratingError> for ConfigError {
    fn from(value: GratingError) -> Self {
        ConfigError::Invalid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_demo_defaults() {
        let config = GratingConfig::from_str("").unwrap();
        assert_eq!(config, GratingConfig::default());
        assert_eq!(config.sequence.spatial_frequency, 128.0);
        assert_eq!(config.sequence.orientation, 45.0);
        assert_eq!(config.sequence.velocity, 30.0);
        assert_eq!(config.sequence.waveform, Waveform::Sine);
        assert_eq!(
            (config.sequence.rows, config.sequence.cols, config.sequence.frames),
            (24, 64, 30)
        );
        assert_eq!(config.render.columns, 10);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let toml = "[grating]\nwaveform = \"square\"\nrows = 8\n\n[render]\ngutter = 0";
        let config = GratingConfig::from_str(toml).unwrap();
        assert_eq!(config.sequence.waveform, Waveform::Square);
        assert_eq!(config.sequence.rows, 8);
        assert_eq!(config.sequence.cols, 64);
        assert_eq!(config.render.gutter, 0);
        assert_eq!(config.render.output, PathBuf::from("out/gratings.png"));
    }

    #[test]
    fn unknown_waveform_is_a_parse_error() {
        let err = GratingConfig::from_str("[grating]\nwaveform = \"triangle\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref msg) if msg.contains("triangle")));
    }

    #[test]
    fn invalid_stimulus_is_rejected() {
        let err = GratingConfig::from_str("[grating]\nspatial_frequency = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GratingError::InvalidParameter { .. })
        ));
        let err = GratingConfig::from_str("[grating]\nframes = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GratingError::InvalidFrameCount { frames: 0 })
        ));
    }

    #[test]
    fn zero_columns_is_rejected() {
        let err = GratingConfig::from_str("[render]\ncolumns = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GratingError::InvalidParameter { ref parameter, .. })
                if parameter == "render.columns"
        ));
    }

    #[test]
    fn empty_output_is_rejected() {
        let err = GratingConfig::from_str("[render]\noutput = \"\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(GratingError::InvalidParameter { ref parameter, .. })
                if parameter == "render.output"
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GratingConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

//! Error types for grating generation
//!
//! Every failure aborts the call that raised it; generation never returns a
//! partially filled frame or sequence.

use std::fmt;

/// Result type alias for grating operations
pub type GratingResult<T> = Result<T, GratingError>;

/// Error type for grating generation and parameter parsing
#[derive(Debug, Clone, PartialEq)]
pub enum GratingError {
    /// A scalar parameter is outside its valid domain (e.g. zero spatial frequency)
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Output image has a zero-sized axis
    InvalidDimensions { rows: usize, cols: usize },

    /// Sequence was requested with no frames
    InvalidFrameCount { frames: usize },

    /// Waveform name is not one of the supported shapes
    UnsupportedWaveform { name: String },
}

impl fmt::Display for GratingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GratingError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = '{}': must satisfy {}",
                    parameter, value, constraint
                )
            }
            GratingError::InvalidDimensions { rows, cols } => {
                write!(
                    f,
                    "Invalid dimensions {}x{}: rows and cols must both be positive",
                    rows, cols
                )
            }
            GratingError::InvalidFrameCount { frames } => {
                write!(
                    f,
                    "Invalid frame count {}: a sequence needs at least one frame",
                    frames
                )
            }
            GratingError::UnsupportedWaveform { name } => {
                write!(
                    f,
                    "Unsupported waveform '{}': expected one of 'sine' ('sin') or 'square' ('sqr')",
                    name
                )
            }
        }
    }
}

impl std::error::Error for GratingError {}

impl GratingError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl fmt::Display,
        constraint: impl Into<String>,
    ) -> Self {
        GratingError::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }

    pub fn invalid_dimensions(rows: usize, cols: usize) -> Self {
        GratingError::InvalidDimensions { rows, cols }
    }

    pub fn invalid_frame_count(frames: usize) -> Self {
        GratingError::InvalidFrameCount { frames }
    }

    pub fn unsupported_waveform(name: impl Into<String>) -> Self {
        GratingError::UnsupportedWaveform { name: name.into() }
    }
}

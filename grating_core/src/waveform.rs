//! Cross-sectional wave shapes for gratings.

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GratingError;

/// Wave profile of a grating.
///
/// Strings are accepted only at the parsing boundary ([`FromStr`] and serde),
/// where both the long names and the short `sin`/`sqr` spellings are valid.
/// Anything else is rejected with [`GratingError::UnsupportedWaveform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    /// Smooth sinusoidal profile: sin(arg)
    #[default]
    #[serde(alias = "sin")]
    Sine,
    /// Hard-edged profile with a 50% duty cycle, sharing period and zero
    /// crossings with the sine
    #[serde(alias = "sqr")]
    Square,
}

impl Waveform {
    /// All supported waveforms, in declaration order.
    pub const ALL: [Waveform; 2] = [Waveform::Sine, Waveform::Square];

    /// Evaluates the raw wave at `arg` radians, returning a value in [-1, 1].
    ///
    /// The square wave is +1 on `[0, π)` of every period and -1 on `[π, 2π)`,
    /// so it is +1 exactly where the sine starts its positive half.
    #[inline]
    pub fn evaluate(self, arg: f64) -> f64 {
        match self {
            Waveform::Sine => arg.sin(),
            Waveform::Square => {
                if arg.rem_euclid(TAU) < PI {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }

    /// Evaluates the wave and maps it from [-1, 1] into [0, 1].
    #[inline]
    pub fn intensity(self, arg: f64) -> f64 {
        (self.evaluate(arg) + 1.0) / 2.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Waveform {
    type Err = GratingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" | "sqr" => Ok(Waveform::Square),
            _ => Err(GratingError::unsupported_waveform(s)),
        }
    }
}

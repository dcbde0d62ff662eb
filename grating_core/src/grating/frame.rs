use std::f64::consts::PI;
use std::fmt::{self, Display};

use ndarray::{Array2, ArrayView2, ArrayViewMut2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{GratingError, GratingResult};
use crate::statistics::FrameStatistics;
use crate::waveform::Waveform;

/// Parameters of a single static grating.
///
/// # Examples
///
/// ```
/// use grating_core::{grating_frame, GratingParams, Waveform};
///
/// let params = GratingParams::new(128.0, 45.0, Waveform::Sine, 1, 1);
/// let frame = grating_frame(&params).unwrap();
/// assert_eq!(frame.get(0, 0), Some(0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GratingParams {
    /// Pixel period of one light/dark cycle (nonzero)
    pub spatial_frequency: f64,
    /// Stripe orientation in degrees; 0 gives vertical stripes
    pub orientation: f64,
    /// Shift along the propagation axis, in pixels
    pub phase_offset: f64,
    pub waveform: Waveform,
    pub rows: usize,
    pub cols: usize,
}

impl GratingParams {
    /// Creates parameters with a zero phase offset.
    pub fn new(
        spatial_frequency: f64,
        orientation: f64,
        waveform: Waveform,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            spatial_frequency,
            orientation,
            phase_offset: 0.0,
            waveform,
            rows,
            cols,
        }
    }

    pub fn with_phase_offset(mut self, phase_offset: f64) -> Self {
        self.phase_offset = phase_offset;
        self
    }

    /// Checks dimensions first, then the scalar parameters.
    pub fn validate(&self) -> GratingResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GratingError::invalid_dimensions(self.rows, self.cols));
        }
        if self.spatial_frequency == 0.0 || !self.spatial_frequency.is_finite() {
            return Err(GratingError::invalid_parameter(
                "spatial_frequency",
                self.spatial_frequency,
                "nonzero and finite",
            ));
        }
        if !self.orientation.is_finite() {
            return Err(GratingError::invalid_parameter(
                "orientation",
                self.orientation,
                "finite",
            ));
        }
        if !self.phase_offset.is_finite() {
            return Err(GratingError::invalid_parameter(
                "phase_offset",
                self.phase_offset,
                "finite",
            ));
        }

        // |gradient| never exceeds rows + cols, so this bounds every wave argument.
        let extent = self.rows.saturating_add(self.cols) as f64;
        let spatial_span = (2.0 * PI * extent / self.spatial_frequency).abs();
        if !spatial_span.is_finite() {
            return Err(GratingError::invalid_parameter(
                "spatial_frequency",
                self.spatial_frequency,
                "large enough that 2π·(rows + cols) / spatial_frequency is finite",
            ));
        }
        let phase_radians = self.phase_radians();
        if !phase_radians.is_finite() || !(spatial_span + phase_radians.abs()).is_finite() {
            return Err(GratingError::invalid_parameter(
                "phase_offset",
                self.phase_offset,
                "small enough relative to spatial_frequency that the wave phase is finite",
            ));
        }
        Ok(())
    }

    /// Phase offset converted to radians: `phase_offset / spatial_frequency · 360°`.
    fn phase_radians(&self) -> f64 {
        let phase = self.phase_offset / self.spatial_frequency * 360.0;
        phase * PI / 180.0
    }

    /// Method form of [`grating_frame`].
    pub fn render(&self) -> GratingResult<GratingFrame> {
        grating_frame(self)
    }
}

/// Computes one static grating image with values in [0, 1].
///
/// The orientation is reflected and rotated (`-orientation - 90`) so that 0°
/// yields vertical stripes, a linear gradient is built over the pixel grid
/// (x across columns, y down rows) and fed through the waveform:
///
/// `arg = 2π·(sin θ·x − cos θ·y) / spatial_frequency + phase`
///
/// where `phase = phase_offset / spatial_frequency · 2π`. The raw wave in
/// [-1, 1] is mapped to `(raw + 1) / 2`.
///
/// # Errors
///
/// * [`GratingError::InvalidDimensions`] if `rows` or `cols` is zero
/// * [`GratingError::InvalidParameter`] if `spatial_frequency` is zero, any
///   scalar is not finite, or the wave argument would overflow to infinity
pub fn grating_frame(params: &GratingParams) -> GratingResult<GratingFrame> {
    params.validate()?;
    let mut image = Array2::zeros((params.rows, params.cols));
    render_into(params, image.view_mut());
    tracing::debug!(
        rows = params.rows,
        cols = params.cols,
        waveform = %params.waveform,
        phase_offset = params.phase_offset,
        "rendered grating frame"
    );
    Ok(GratingFrame { image })
}

/// Fills `out` with the grating described by `params`.
///
/// `params` must already be validated and `out` must be `rows x cols`.
pub(crate) fn render_into(params: &GratingParams, out: ArrayViewMut2<'_, f64>) {
    debug_assert_eq!(out.dim(), (params.rows, params.cols));

    // The remainder is exact, but ori + 360 is itself rounded for fractional
    // angles, so ori and ori + 360 agree only to within an ulp of the sum.
    let orientation = -params.orientation.rem_euclid(360.0) - 90.0;

    let theta = orientation * PI / 180.0;
    let (sin_theta, cos_theta) = (theta.sin(), theta.cos());
    let phase_radians = params.phase_radians();
    let spatial_frequency = params.spatial_frequency;
    let waveform = params.waveform;

    Zip::indexed(out).par_for_each(|(row, col), value| {
        let gradient = sin_theta * col as f64 - cos_theta * row as f64;
        let arg = (2.0 * PI * gradient) / spatial_frequency + phase_radians;
        *value = waveform.intensity(arg);
    });
}

/// A single grating image: `rows x cols` intensities in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct GratingFrame {
    image: Array2<f64>,
}

impl GratingFrame {
    pub(crate) fn from_image(image: Array2<f64>) -> Self {
        Self { image }
    }

    pub fn rows(&self) -> usize {
        self.image.nrows()
    }

    pub fn cols(&self) -> usize {
        self.image.ncols()
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.image.dim()
    }

    /// Intensity at a pixel, or `None` outside the image.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.image.get((row, col)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.image.view()
    }

    pub fn into_array(self) -> Array2<f64> {
        self.image
    }

    pub fn statistics(&self) -> FrameStatistics {
        FrameStatistics::from_array(&self.image)
    }
}

impl Display for GratingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GratingFrame {}x{} {}",
            self.rows(),
            self.cols(),
            self.statistics()
        )
    }
}

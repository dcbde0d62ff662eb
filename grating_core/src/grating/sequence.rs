use std::fmt::{self, Display};

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::frame::{render_into, GratingFrame, GratingParams};
use crate::error::{GratingError, GratingResult};
use crate::statistics::FrameStatistics;
use crate::waveform::Waveform;

/// Parameters of a drifting grating animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SequenceParams {
    pub spatial_frequency: f64,
    pub orientation: f64,
    /// Phase offset reached by the last frame, in pixels
    pub velocity: f64,
    pub waveform: Waveform,
    pub rows: usize,
    pub cols: usize,
    pub frames: usize,
}

impl SequenceParams {
    /// Frame parameters shared by every frame, at the given offset.
    pub fn frame_params(&self, phase_offset: f64) -> GratingParams {
        GratingParams::new(
            self.spatial_frequency,
            self.orientation,
            self.waveform,
            self.rows,
            self.cols,
        )
        .with_phase_offset(phase_offset)
    }

    /// Checks the frame count first, then the shared frame parameters.
    pub fn validate(&self) -> GratingResult<()> {
        if self.frames == 0 {
            return Err(GratingError::invalid_frame_count(self.frames));
        }
        self.frame_params(0.0).validate()?;
        if !self.velocity.is_finite() {
            return Err(GratingError::invalid_parameter(
                "velocity",
                self.velocity,
                "finite",
            ));
        }
        // Floored offsets never exceed |velocity| + 1 in magnitude.
        let widest_offset = self.velocity.abs() + 1.0;
        if self.frame_params(widest_offset).validate().is_err() {
            return Err(GratingError::invalid_parameter(
                "velocity",
                self.velocity,
                "small enough relative to spatial_frequency that every frame phase is finite",
            ));
        }
        Ok(())
    }

    /// Method form of [`grating_sequence`].
    pub fn render(&self) -> GratingResult<GratingSequence> {
        grating_sequence(self)
    }

    /// Lazily renders frames one at a time, in time order.
    ///
    /// Parameters are validated up front, so iteration itself cannot fail.
    pub fn frames_iter(&self) -> GratingResult<SequenceFrames> {
        self.validate()?;
        Ok(SequenceFrames {
            params: *self,
            offsets: phase_offsets(self.velocity, self.frames).into_iter(),
        })
    }
}

/// Integer pixel offsets for each frame of a sweep.
///
/// Samples `frames` evenly spaced points over `[0, 1]` (the last is exactly 1),
/// scales them by `velocity` and floors the result. Small velocities relative
/// to the frame count therefore repeat offsets, giving stepped motion.
pub fn phase_offsets(velocity: f64, frames: usize) -> Vec<f64> {
    match frames {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = 1.0 / (frames - 1) as f64;
            (0..frames)
                .map(|i| {
                    let t = if i == frames - 1 { 1.0 } else { i as f64 * step };
                    (t * velocity).floor()
                })
                .collect()
        }
    }
}

/// Renders every frame of a drifting grating.
///
/// Frames are independent, so they are computed in parallel and written back
/// by index; frame `i` is exactly `grating_frame` at `phase_offsets(..)[i]`.
///
/// # Errors
///
/// * [`GratingError::InvalidFrameCount`] if `frames` is zero
/// * any error [`grating_frame`](super::grating_frame) would raise for the
///   shared parameters
/// * [`GratingError::InvalidParameter`] if `velocity` is not finite, or large
///   enough relative to `spatial_frequency` to overflow a frame's phase
///
/// # Examples
///
/// ```
/// use grating_core::{grating_sequence, SequenceParams, Waveform};
///
/// let params = SequenceParams {
///     spatial_frequency: 128.0,
///     orientation: 45.0,
///     velocity: 30.0,
///     waveform: Waveform::Sine,
///     rows: 24,
///     cols: 64,
///     frames: 30,
/// };
/// let sequence = grating_sequence(&params).unwrap();
/// assert_eq!(sequence.shape(), (30, 24, 64));
/// ```
pub fn grating_sequence(params: &SequenceParams) -> GratingResult<GratingSequence> {
    params.validate()?;
    let offsets = phase_offsets(params.velocity, params.frames);

    let mut frames = Array3::zeros((params.frames, params.rows, params.cols));
    frames
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(offsets.par_iter())
        .for_each(|(slot, &offset)| render_into(&params.frame_params(offset), slot));

    tracing::debug!(
        frames = params.frames,
        rows = params.rows,
        cols = params.cols,
        velocity = params.velocity,
        waveform = %params.waveform,
        "rendered grating sequence"
    );

    Ok(GratingSequence { frames, offsets })
}

/// Time-ordered stack of grating frames, shaped `[frames, rows, cols]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GratingSequence {
    frames: Array3<f64>,
    offsets: Vec<f64>,
}

impl GratingSequence {
    pub fn len(&self) -> usize {
        self.frames.len_of(Axis(0))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (frames, rows, cols)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.frames.dim()
    }

    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        (index < self.len()).then(|| self.frames.index_axis(Axis(0), index))
    }

    pub fn frame_owned(&self, index: usize) -> Option<GratingFrame> {
        self.frame(index)
            .map(|view| GratingFrame::from_image(view.to_owned()))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ArrayView2<'_, f64>> + '_ {
        self.frames.outer_iter()
    }

    /// Pixel offset each frame was rendered at.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn as_array(&self) -> ArrayView3<'_, f64> {
        self.frames.view()
    }

    pub fn into_array(self) -> Array3<f64> {
        self.frames
    }

    /// Statistics across every pixel of every frame.
    pub fn statistics(&self) -> FrameStatistics {
        FrameStatistics::from_array(&self.frames)
    }
}

impl Display for GratingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (frames, rows, cols) = self.shape();
        write!(
            f,
            "GratingSequence {} frames of {}x{} {}",
            frames,
            rows,
            cols,
            self.statistics()
        )
    }
}

/// Lazy frame iterator returned by [`SequenceParams::frames_iter`].
#[derive(Debug, Clone)]
pub struct SequenceFrames {
    params: SequenceParams,
    offsets: std::vec::IntoIter<f64>,
}

impl SequenceFrames {
    fn render(&self, offset: f64) -> GratingFrame {
        let params = self.params.frame_params(offset);
        let mut image = Array2::zeros((params.rows, params.cols));
        render_into(&params, image.view_mut());
        GratingFrame::from_image(image)
    }
}

impl Iterator for SequenceFrames {
    type Item = GratingFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        Some(self.render(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl DoubleEndedIterator for SequenceFrames {
    fn next_back(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next_back()?;
        Some(self.render(offset))
    }
}

impl ExactSizeIterator for SequenceFrames {}

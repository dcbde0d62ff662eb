//! # Grating Core
//!
//! Deterministic synthesis of visual grating stimuli. A grating is a stripe
//! pattern with a sine or square cross-section; sweeping its phase over time
//! produces a drifting animation.
//!
//! ## Quick Start
//!
//! ```rust
//! use grating_core::{grating_frame, grating_sequence, GratingParams, SequenceParams, Waveform};
//!
//! // A single static frame
//! let frame = grating_frame(&GratingParams::new(32.0, 45.0, Waveform::Sine, 24, 64)).unwrap();
//! assert_eq!(frame.shape(), (24, 64));
//!
//! // A drifting square-wave grating, 10 frames long
//! let params = SequenceParams {
//!     spatial_frequency: 32.0,
//!     orientation: 0.0,
//!     velocity: 16.0,
//!     waveform: Waveform::Square,
//!     rows: 24,
//!     cols: 64,
//!     frames: 10,
//! };
//! let sequence = grating_sequence(&params).unwrap();
//! println!("{}", sequence);
//! ```
//!
//! ## Core Modules
//!
//! - [`grating`] - Frame and sequence generation
//! - [`waveform`] - Supported wave shapes
//! - [`config`] - Stimulus configuration via TOML
//! - [`render`] - Grayscale PNG export
//! - [`logging`] - JSON line-delimited run logs

pub mod config;
pub mod error;
pub mod grating;
pub mod logging;
pub mod render;
pub mod statistics;
pub mod waveform;

pub use config::{ConfigError, GratingConfig, RenderConfig};
pub use error::{GratingError, GratingResult};
pub use grating::{
    grating_frame, grating_sequence, phase_offsets, GratingFrame, GratingParams, GratingSequence,
    SequenceFrames, SequenceParams,
};
pub use render::{save_contact_sheet, save_frame_png};
pub use statistics::FrameStatistics;
pub use waveform::Waveform;

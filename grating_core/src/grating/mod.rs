pub mod frame;
pub mod sequence;

pub use frame::{grating_frame, GratingFrame, GratingParams};
pub use sequence::{
    grating_sequence, phase_offsets, GratingSequence, SequenceFrames, SequenceParams,
};

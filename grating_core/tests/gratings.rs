use grating_core::{
    grating_frame, grating_sequence, phase_offsets, GratingError, GratingParams, SequenceParams,
    Waveform,
};

fn demo_sequence() -> SequenceParams {
    SequenceParams {
        spatial_frequency: 128.0,
        orientation: 45.0,
        velocity: 30.0,
        waveform: Waveform::Sine,
        rows: 24,
        cols: 64,
        frames: 30,
    }
}

#[test]
fn frame_values_stay_in_unit_interval() {
    for waveform in Waveform::ALL {
        for orientation in [0.0, 12.5, 45.0, 90.0, 181.0, -73.0, 720.0] {
            for spatial_frequency in [3.0, 7.5, 64.0, -20.0] {
                let params = GratingParams::new(spatial_frequency, orientation, waveform, 9, 13)
                    .with_phase_offset(5.0);
                let frame = grating_frame(&params).unwrap();
                assert!(frame.view().iter().all(|v| (0.0..=1.0).contains(v)));
            }
        }
    }
}

#[test]
fn frames_are_deterministic() {
    let params = GratingParams::new(17.0, 33.0, Waveform::Sine, 20, 30).with_phase_offset(4.0);
    assert_eq!(grating_frame(&params).unwrap(), grating_frame(&params).unwrap());
}

fn approx_equal(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "{} !≈ {}", a, b);
}

#[test]
fn orientation_is_periodic_in_360_degrees() {
    for orientation in [0.0, 45.0, 100.0, -30.0, 0.1, 12.345, -0.7] {
        let a = GratingParams::new(24.0, orientation, Waveform::Sine, 12, 18);
        let b = GratingParams {
            orientation: orientation + 360.0,
            ..a
        };
        let (a, b) = (grating_frame(&a).unwrap(), grating_frame(&b).unwrap());
        for (x, y) in a.view().iter().zip(b.view().iter()) {
            approx_equal(*x, *y, 1e-9);
        }
    }
}

#[test]
fn integer_orientations_repeat_bit_for_bit() {
    for orientation in [0.0, 45.0, 100.0, -30.0] {
        let a = GratingParams::new(24.0, orientation, Waveform::Sine, 12, 18);
        let b = GratingParams {
            orientation: orientation + 720.0,
            ..a
        };
        assert_eq!(grating_frame(&a).unwrap(), grating_frame(&b).unwrap());
    }
}

#[test]
fn square_wave_is_binary() {
    let params = GratingParams::new(10.0, 30.0, Waveform::Square, 16, 16).with_phase_offset(3.0);
    let frame = grating_frame(&params).unwrap();
    assert!(frame.view().iter().all(|&v| v == 0.0 || v == 1.0));
    let stats = frame.statistics();
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 1.0);
}

#[test]
fn single_pixel_sine_is_half() {
    let frame = grating_frame(&GratingParams::new(128.0, 45.0, Waveform::Sine, 1, 1)).unwrap();
    assert_eq!(frame.into_array(), ndarray::array![[0.5]]);
}

#[test]
fn unsupported_waveform_is_rejected_at_parse() {
    let err = "triangle".parse::<Waveform>().unwrap_err();
    assert!(matches!(err, GratingError::UnsupportedWaveform { ref name } if name == "triangle"));
}

#[test]
fn zero_spatial_frequency_is_invalid_parameter() {
    let err = grating_frame(&GratingParams::new(0.0, 45.0, Waveform::Sine, 4, 4)).unwrap_err();
    assert!(matches!(
        err,
        GratingError::InvalidParameter { ref parameter, .. } if parameter == "spatial_frequency"
    ));
}

#[test]
fn zero_dimensions_are_invalid() {
    let err = grating_frame(&GratingParams::new(8.0, 0.0, Waveform::Sine, 4, 0)).unwrap_err();
    assert_eq!(err, GratingError::InvalidDimensions { rows: 4, cols: 0 });
}

#[test]
fn demo_sequence_has_expected_shape_and_first_frame() {
    let params = demo_sequence();
    let sequence = grating_sequence(&params).unwrap();

    assert_eq!(sequence.len(), 30);
    assert_eq!(sequence.shape(), (30, 24, 64));
    assert!(sequence.as_array().iter().all(|v| (0.0..=1.0).contains(v)));

    let still = grating_frame(&GratingParams::new(128.0, 45.0, Waveform::Sine, 24, 64)).unwrap();
    assert_eq!(sequence.frame(0).unwrap(), still.view());
    assert_eq!(sequence.offsets(), phase_offsets(30.0, 30).as_slice());
}

#[test]
fn sequence_offsets_drive_motion() {
    let sequence = grating_sequence(&SequenceParams {
        velocity: 2.0,
        frames: 5,
        ..demo_sequence()
    })
    .unwrap();

    // Offsets 0, 0, 1, 1, 2: repeated offsets give identical frames.
    assert_eq!(sequence.frame(0), sequence.frame(1));
    assert_eq!(sequence.frame(2), sequence.frame(3));
    assert_ne!(sequence.frame(1), sequence.frame(2));
}

#[test]
fn overflowing_phase_sweep_is_rejected() {
    let params = SequenceParams {
        spatial_frequency: 1e-300,
        velocity: 1e300,
        ..demo_sequence()
    };
    let err = grating_sequence(&params).unwrap_err();
    assert!(matches!(
        err,
        GratingError::InvalidParameter { ref parameter, .. } if parameter == "velocity"
    ));
    assert!(params.frames_iter().is_err());
}

#[test]
fn tiny_spatial_frequency_sequence_stays_in_unit_interval() {
    let sequence = grating_sequence(&SequenceParams {
        spatial_frequency: 1e-300,
        velocity: 3.0,
        frames: 4,
        ..demo_sequence()
    })
    .unwrap();
    assert!(sequence.as_array().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn zero_frames_is_invalid_frame_count() {
    let err = grating_sequence(&SequenceParams {
        frames: 0,
        ..demo_sequence()
    })
    .unwrap_err();
    assert_eq!(err, GratingError::InvalidFrameCount { frames: 0 });
}

#[test]
fn lazy_iteration_matches_eager_generation() {
    let params = SequenceParams {
        frames: 8,
        waveform: Waveform::Square,
        ..demo_sequence()
    };
    let eager = grating_sequence(&params).unwrap();
    let lazy: Vec<_> = params.frames_iter().unwrap().collect();
    assert_eq!(lazy.len(), eager.len());
    for (frame, view) in lazy.iter().zip(eager.iter()) {
        assert_eq!(frame.view(), view);
    }
}

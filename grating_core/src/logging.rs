//! JSON line-delimited run logs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::grating::{GratingSequence, SequenceParams};
use crate::statistics::FrameStatistics;

const SEQUENCE_LOG: &str = "logs/gratings.jsonl";

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[derive(Debug, Serialize)]
pub struct SequenceLogEntry {
    pub params: SequenceParams,
    pub shape: [usize; 3],
    pub offsets: Vec<f64>,
    pub statistics: FrameStatistics,
    pub timestamp_ms: u128,
}

impl SequenceLogEntry {
    pub fn new(params: &SequenceParams, sequence: &GratingSequence) -> Self {
        let (frames, rows, cols) = sequence.shape();
        Self {
            params: *params,
            shape: [frames, rows, cols],
            offsets: sequence.offsets().to_vec(),
            statistics: sequence.statistics(),
            timestamp_ms: timestamp_ms(),
        }
    }
}

/// Appends a record of a generated sequence to `logs/gratings.jsonl`.
pub fn log_sequence(params: &SequenceParams, sequence: &GratingSequence) -> io::Result<()> {
    log_sequence_to(SEQUENCE_LOG, params, sequence)
}

/// Same as [`log_sequence`] but writes to an explicit file.
pub fn log_sequence_to<P: AsRef<Path>>(
    path: P,
    params: &SequenceParams,
    sequence: &GratingSequence,
) -> io::Result<()> {
    let entry = SequenceLogEntry::new(params, sequence);
    append_json_line(path, &entry)
}

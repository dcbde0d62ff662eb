use std::fmt::{self, Display};

use ndarray::{ArrayBase, Data, Dimension};
use rayon::prelude::*;
use serde::Serialize;

const REDUCTION_CHUNK: usize = 4096;

/// Summary of the intensities in a frame or a whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct FrameStatistics {
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl FrameStatistics {
    /// Computes population statistics over every element of `values`.
    ///
    /// An empty array yields all-zero statistics.
    pub fn from_array<S, D>(values: &ArrayBase<S, D>) -> Self
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let count = values.len();
        if count == 0 {
            return Self::default();
        }
        let cells = count as f64;

        let (sum, min, max) = if let Some(slice) = values.as_slice() {
            // Fixed chunks summed in order keep the result independent of how
            // rayon splits the work.
            slice
                .par_chunks(REDUCTION_CHUNK)
                .map(|chunk| {
                    chunk.iter().fold(
                        (0.0, f64::INFINITY, f64::NEG_INFINITY),
                        |acc, &value| (acc.0 + value, acc.1.min(value), acc.2.max(value)),
                    )
                })
                .collect::<Vec<_>>()
                .into_iter()
                .fold((0.0, f64::INFINITY, f64::NEG_INFINITY), |a, b| {
                    (a.0 + b.0, a.1.min(b.1), a.2.max(b.2))
                })
        } else {
            values.iter().fold(
                (0.0, f64::INFINITY, f64::NEG_INFINITY),
                |acc, &value| (acc.0 + value, acc.1.min(value), acc.2.max(value)),
            )
        };
        let mean = sum / cells;

        let squared = if let Some(slice) = values.as_slice() {
            slice
                .par_chunks(REDUCTION_CHUNK)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|value| squared_diff(*value, mean))
                        .sum::<f64>()
                })
                .collect::<Vec<_>>()
                .into_iter()
                .sum::<f64>()
        } else {
            values
                .iter()
                .map(|value| squared_diff(*value, mean))
                .sum::<f64>()
        };

        Self {
            mean,
            variance: squared / cells,
            min,
            max,
        }
    }
}

fn squared_diff(value: f64, mean: f64) -> f64 {
    let diff = value - mean;
    diff * diff
}

impl Display for FrameStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean={:.4} variance={:.5} range=[{:.4}, {:.4}]",
            self.mean, self.variance, self.min, self.max
        )
    }
}

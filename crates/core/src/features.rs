//! Audio feature computation.
//!
//! Operates on mono f32 samples as produced by `resona-audio`. The feature
//! set matches what the extraction task persists to `audio_features`:
//! spectral centroid, RMS energy, peak amplitude, and a fixed-length MFCC
//! vector. MFCC analysis is not implemented yet; the vector is zero-filled
//! to keep the column shape stable for clients.

use serde::{Deserialize, Serialize};

/// Number of MFCC coefficients stored per track.
pub const MFCC_LEN: usize = 13;

/// Extracted scalar features for one track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub spectral_centroid: f64,
    pub rms: f64,
    pub peak_amplitude: f64,
    pub mfcc: Vec<f64>,
}

/// Compute the feature vector for a decoded track.
///
/// Empty input is treated as a single zero sample, so silence and
/// zero-length decodes produce an all-zero vector rather than NaNs.
pub fn compute_features(samples: &[f32]) -> FeatureVector {
    static ZERO: [f32; 1] = [0.0];
    let samples = if samples.is_empty() { &ZERO[..] } else { samples };

    let n = samples.len() as f64;
    let mut abs_sum = 0.0f64;
    let mut square_sum = 0.0f64;
    let mut peak = 0.0f64;

    for &s in samples {
        let a = f64::from(s).abs();
        abs_sum += a;
        square_sum += f64::from(s) * f64::from(s);
        if a > peak {
            peak = a;
        }
    }

    FeatureVector {
        spectral_centroid: abs_sum / n,
        rms: (square_sum / n).sqrt(),
        peak_amplitude: peak,
        mfcc: vec![0.0; MFCC_LEN],
    }
}

/// Duration in seconds for a mono sample buffer at the given samplerate.
pub fn duration_secs(sample_count: usize, samplerate: u32) -> f64 {
    sample_count as f64 / f64::from(samplerate)
}

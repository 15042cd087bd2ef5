//! Pairwise track similarity.
//!
//! Scores are derived from the euclidean distance between scalar feature
//! vectors (spectral centroid, RMS, peak amplitude). The MFCC vector is
//! excluded while it is zero-filled.
//!
//! Properties relied on by the worker and the `/tracks/{id}/similar`
//! ranking:
//! - symmetric: `score(a, b) == score(b, a)`
//! - bounded: scores are in `(0, 1]`
//! - identical feature vectors score exactly 1.0
//! - strictly decreasing as feature distance grows

use crate::features::FeatureVector;

/// Similarity score between two feature vectors.
pub fn similarity_score(a: &FeatureVector, b: &FeatureVector) -> f64 {
    1.0 / (1.0 + feature_distance(a, b))
}

/// Euclidean distance over the scalar features.
fn feature_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let dc = a.spectral_centroid - b.spectral_centroid;
    let dr = a.rms - b.rms;
    let dp = a.peak_amplitude - b.peak_amplitude;
    (dc * dc + dr * dr + dp * dp).sqrt()
}

//! Domain logic for the Resona audio analysis platform.
//!
//! Pure, database-free building blocks shared by the API server and the
//! background worker:
//!
//! - [`types`]: shared id and timestamp aliases.
//! - [`error`]: the [`CoreError`](error::CoreError) domain error.
//! - [`track`]: track lifecycle status machine.
//! - [`features`]: audio feature computation over decoded samples.
//! - [`similarity`]: pairwise similarity scoring between feature vectors.

pub mod error;
pub mod features;
pub mod similarity;
pub mod track;
pub mod types;

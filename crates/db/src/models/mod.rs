//! Entity models and DTOs.
//!
//! Row structs derive `sqlx::FromRow` and serialize with the wire field
//! names the API exposes (e.g. a track's `id` column serializes as
//! `track_id`).

pub mod audio_feature;
pub mod job;
pub mod similarity;
pub mod status;
pub mod track;

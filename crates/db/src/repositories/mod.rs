//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audio_feature_repo;
pub mod job_repo;
pub mod similarity_repo;
pub mod track_repo;

pub use audio_feature_repo::AudioFeatureRepo;
pub use job_repo::JobRepo;
pub use similarity_repo::SimilarityRepo;
pub use track_repo::TrackRepo;

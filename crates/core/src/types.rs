/// Numeric database primary keys are PostgreSQL BIGSERIAL.
///
/// Tracks are the exception: they use opaque string ids (`track-<hex>`)
/// so ids can be handed to clients before the row exists.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

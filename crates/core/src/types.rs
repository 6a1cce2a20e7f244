//! Storage-facing aliases shared by the db and api crates.

/// Primary key of a `bug_reports` row (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// Row timestamps. Stored as `TIMESTAMPTZ`, always handled in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

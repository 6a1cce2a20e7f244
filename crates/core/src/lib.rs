//! Domain contract shared by the bug report server and client.
//!
//! Holds the field limits, severity enumeration, user-visible messages, and
//! validation rules that both sides of the submission exchange agree on.

pub mod bug_report;
pub mod error;
pub mod types;

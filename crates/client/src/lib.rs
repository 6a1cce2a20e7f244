//! `bugdesk-client` library crate.
//!
//! The report form state machine ([`form::ReportForm`]) and the transport it
//! submits through ([`api::BugReportApi`]). The `bugdesk-report` binary in
//! `main.rs` is a thin command-line front end over both.

pub mod api;
pub mod config;
pub mod form;

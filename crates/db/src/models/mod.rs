pub mod bug_report;

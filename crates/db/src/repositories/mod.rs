mod bug_report_repo;

pub use bug_report_repo::BugReportRepo;

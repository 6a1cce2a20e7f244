use crate::bug_report::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// One or more input fields failed validation, keyed by field name.
    #[error("Invalid fields: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    InvalidFields(FieldErrors),
}

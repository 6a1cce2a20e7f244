//! The "report a bug" form.
//!
//! [`ReportForm`] owns the draft, the error map, and the success/general
//! messages, and moves through [`FormStatus`] only via [`ReportForm::edit`]
//! and [`ReportForm::submit`]. Every transition publishes a [`FormView`] on a
//! watch channel so a renderer can follow the in-flight state while the
//! request is unresolved.
//!
//! ```text
//! Idle ──submit (title ok)──> Submitting ──Created──────────> Settled(Success)
//!   ^                             │        ──ValidationFailed─> Settled(Error)
//!   │                             │        ──Fault────────────> Settled(Error)
//!   └──submit (title blank)       └──dropped mid-flight───────> Idle
//! ```

use std::collections::BTreeMap;

use bugdesk_core::bug_report::{
    self, FieldErrors, Severity, UnknownSeverity, FIELD_DESCRIPTION, FIELD_SEVERITY, FIELD_TITLE,
    LABEL_SUBMIT, LABEL_SUBMITTING, MSG_GENERAL_ERROR, MSG_SUCCESS, MSG_TITLE_REQUIRED_LOCAL,
};
use tokio::sync::watch;

use crate::api::{BugReportApi, SubmissionPayload, SubmitOutcome};

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// An editable input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Severity,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Description, Field::Severity];

    /// Field name as used in request bodies and error maps.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => FIELD_TITLE,
            Field::Description => FIELD_DESCRIPTION,
            Field::Severity => FIELD_SEVERITY,
        }
    }
}

/// The unsaved values of the three inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Draft {
    fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            severity: self.severity,
        }
    }
}

// ---------------------------------------------------------------------------
// Status and view
// ---------------------------------------------------------------------------

/// How a settled attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Error,
}

/// Submission lifecycle. `Settled` accepts a new attempt just like `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Settled(Settlement),
}

impl FormStatus {
    pub fn is_submitting(self) -> bool {
        self == FormStatus::Submitting
    }
}

/// Everything a renderer needs to draw the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub status: FormStatus,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    /// First message per field.
    pub field_errors: BTreeMap<String, String>,
    pub success_message: Option<String>,
    pub general_error: Option<String>,
    pub submit_disabled: bool,
    pub submit_label: &'static str,
}

impl FormView {
    /// The message shown under `field`, if any.
    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field.name()).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Client-side state machine for one bug report form.
pub struct ReportForm {
    draft: Draft,
    errors: FieldErrors,
    success_message: Option<String>,
    general_error: Option<String>,
    status: FormStatus,
    view_tx: watch::Sender<FormView>,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportForm {
    /// A form with an empty draft and severity `medium`.
    pub fn new() -> Self {
        let (view_tx, _) = watch::channel(FormView::default());
        let form = Self {
            draft: Draft::default(),
            errors: FieldErrors::new(),
            success_message: None,
            general_error: None,
            status: FormStatus::Idle,
            view_tx,
        };
        form.publish();
        form
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Receive a new [`FormView`] after every transition.
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view_tx.subscribe()
    }

    /// Snapshot of the current render state.
    pub fn view(&self) -> FormView {
        FormView {
            status: self.status,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            severity: self.draft.severity,
            field_errors: self
                .errors
                .iter()
                .filter_map(|(field, messages)| {
                    messages.first().map(|m| (field.clone(), m.clone()))
                })
                .collect(),
            success_message: self.success_message.clone(),
            general_error: self.general_error.clone(),
            submit_disabled: self.status.is_submitting(),
            submit_label: if self.status.is_submitting() {
                LABEL_SUBMITTING
            } else {
                LABEL_SUBMIT
            },
        }
    }

    /// Set a field from its raw input value.
    ///
    /// Clears that field's error, if any. Other errors and the success and
    /// general messages are left alone.
    pub fn edit(&mut self, field: Field, value: &str) -> Result<(), UnknownSeverity> {
        match field {
            Field::Title => self.draft.title = value.to_string(),
            Field::Description => self.draft.description = value.to_string(),
            Field::Severity => self.draft.severity = value.parse()?,
        }
        self.errors.remove(field.name());
        self.publish();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.errors.remove(FIELD_TITLE);
        self.publish();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.errors.remove(FIELD_DESCRIPTION);
        self.publish();
    }

    pub fn set_severity(&mut self, severity: Severity) {
        self.draft.severity = severity;
        self.errors.remove(FIELD_SEVERITY);
        self.publish();
    }

    /// Run one submission attempt and return the resulting status.
    ///
    /// A blank title is caught locally and never reaches `api`. If the
    /// returned future is dropped mid-request, the form falls back to `Idle`
    /// with the draft intact.
    pub async fn submit<A>(&mut self, api: &A) -> FormStatus
    where
        A: BugReportApi + ?Sized,
    {
        self.clear_messages();

        if !bug_report::title_is_present(&self.draft.title) {
            bug_report::push_error(&mut self.errors, FIELD_TITLE, MSG_TITLE_REQUIRED_LOCAL);
            self.status = FormStatus::Idle;
            self.publish();
            return self.status;
        }

        let payload = self.draft.payload();
        let flight = InFlight::enter(self);
        let outcome = api.submit(&payload).await;
        flight.settle(outcome)
    }

    fn clear_messages(&mut self) {
        self.errors.clear();
        self.success_message = None;
        self.general_error = None;
    }

    fn apply(&mut self, outcome: SubmitOutcome) {
        self.status = match outcome {
            SubmitOutcome::Created(report) => {
                tracing::info!(id = report.map(|r| r.id), "Bug reported");
                self.success_message = Some(MSG_SUCCESS.to_string());
                self.draft = Draft::default();
                FormStatus::Settled(Settlement::Success)
            }
            SubmitOutcome::ValidationFailed(errors) => {
                self.errors = errors;
                FormStatus::Settled(Settlement::Error)
            }
            SubmitOutcome::Fault(_) => {
                self.general_error = Some(MSG_GENERAL_ERROR.to_string());
                FormStatus::Settled(Settlement::Error)
            }
        };
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.view());
    }
}

/// Holds the form in `Submitting` for the lifetime of one request.
///
/// Dropping the guard always leaves the form out of `Submitting`, whether
/// the attempt settled or its future was abandoned.
struct InFlight<'a> {
    form: &'a mut ReportForm,
}

impl<'a> InFlight<'a> {
    fn enter(form: &'a mut ReportForm) -> Self {
        form.status = FormStatus::Submitting;
        form.publish();
        Self { form }
    }

    fn settle(self, outcome: SubmitOutcome) -> FormStatus {
        self.form.apply(outcome);
        self.form.status
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.form.status.is_submitting() {
            self.form.status = FormStatus::Idle;
        }
        self.form.publish();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

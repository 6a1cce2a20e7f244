//! `bugdesk-report`: file a bug report from the command line.
//!
//! Fills a [`ReportForm`] from flags, submits it once, and prints the
//! resulting form state. Exit status is `0` when the report was stored, `1`
//! when the attempt settled with an error, and `2` when the form refused to
//! submit.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bugdesk_client::api::HttpBugReportApi;
use bugdesk_client::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use bugdesk_client::form::{Field, FormStatus, FormView, ReportForm, Settlement};
use bugdesk_core::bug_report::Severity;

#[derive(Parser, Debug)]
#[command(name = "bugdesk-report", version, about = "Report a bug to a bugdesk server")]
struct Cli {
    /// Base URL of the bugdesk API
    #[arg(long, env = "BUGDESK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "BUGDESK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Short summary of the bug
    #[arg(short, long, default_value = "")]
    title: String,

    /// Steps to reproduce, expected and actual behaviour
    #[arg(short, long, default_value = "")]
    description: String,

    /// How badly the bug hurts: low, medium or high
    #[arg(short, long, default_value = "medium", value_parser = parse_severity)]
    severity: Severity,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse::<Severity>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bugdesk_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig {
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
    };
    let api = HttpBugReportApi::new(&config)?;
    tracing::debug!(endpoint = api.endpoint(), "Submitting bug report");

    let mut form = ReportForm::new();
    form.set_title(cli.title);
    form.set_description(cli.description);
    form.set_severity(cli.severity);

    let status = form.submit(&api).await;
    print!("{}", render(&form.view()));

    Ok(match status {
        FormStatus::Settled(Settlement::Success) => ExitCode::SUCCESS,
        FormStatus::Settled(Settlement::Error) => ExitCode::from(1),
        FormStatus::Idle | FormStatus::Submitting => ExitCode::from(2),
    })
}

/// Plain-text rendering of the form: banners first, then field errors.
fn render(view: &FormView) -> String {
    let mut out = String::new();
    if let Some(msg) = &view.success_message {
        out.push_str(msg);
        out.push('\n');
    }
    if let Some(msg) = &view.general_error {
        out.push_str(msg);
        out.push('\n');
    }
    for field in Field::ALL {
        if let Some(msg) = view.field_error(field) {
            out.push_str(&format!("{}: {msg}\n", field.name()));
        }
    }
    out
}

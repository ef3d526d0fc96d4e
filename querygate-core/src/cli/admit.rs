use crate::admission::{AdmissionGuard, Decision, Locale, Operation, PolicyTable, QueryDescriptor};
use crate::cli::parse_timestamp;
use crate::conf::load_config;
use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Exit status used when the guard rejects the query.
pub const REJECTED_EXIT_CODE: i32 = 2;

#[derive(Args, Debug, Clone)]
pub struct AdmitArgs {
    /// Operation to evaluate: search or histogram
    #[arg(long)]
    pub op: Operation,

    /// Window start: unix seconds, RFC 3339, `now` or `now-<N><m|h|d>`
    #[arg(long, allow_hyphen_values = true)]
    pub start: String,

    /// Window end, same formats as --start
    #[arg(long, default_value = "now", allow_hyphen_values = true)]
    pub end: String,

    /// Query text as the user typed it
    #[arg(long)]
    pub query: Option<String>,

    /// Evaluate with the unbounded-window capability
    #[arg(long)]
    pub unbounded: bool,

    /// Config directory; production thresholds apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Message locale when no config directory is given
    #[arg(long, default_value = "en")]
    pub locale: Locale,
}

/// Evaluate a single query offline and report the decision.
///
/// Exits with [`REJECTED_EXIT_CODE`] when the query is rejected.
pub fn admit(args: AdmitArgs) -> Result<()> {
    let decision = evaluate(&args)?;

    match &decision {
        Decision::Admit(reason) => {
            println!("{} {} ({})", "✔".green(), "admitted".green().bold(), reason);
        }
        Decision::Reject(rejection) => {
            println!("{} {}", "✘".red(), "rejected".red().bold());
            println!("  {}", rejection.message);
            println!("  width: {}s", rejection.width_seconds);
            if let Some(max) = rejection.max_width_seconds {
                println!("  max width: {}s", max);
            }
            std::process::exit(REJECTED_EXIT_CODE);
        }
    }

    Ok(())
}

pub(crate) fn evaluate(args: &AdmitArgs) -> Result<Decision> {
    let table = match &args.config {
        Some(path) => {
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
                .config
                .policy
        }
        None => PolicyTable::localized(args.locale),
    };

    let start = parse_timestamp(&args.start).context("invalid --start")?;
    let end = parse_timestamp(&args.end).context("invalid --end")?;

    let descriptor = QueryDescriptor::new(args.op, start, end, args.query.as_deref())
        .with_unbounded_window(args.unbounded);

    Ok(AdmissionGuard::new(Arc::new(table)).evaluate(&descriptor))
}

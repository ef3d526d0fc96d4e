use crate::admission::{AdmissionGuard, Operation};
use crate::cli::admit::REJECTED_EXIT_CODE;
use crate::cli::parse_timestamp;
use crate::conf::load_config;
use crate::dispatch::{
    CancellationToken, DispatchError, HttpBackend, QueryDispatcher, QueryExtras, QueryRequest,
};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    pub config: PathBuf,

    /// Target table id
    #[arg(long)]
    pub table: u64,

    /// Window start: unix seconds, RFC 3339, `now` or `now-<N><m|h|d>`
    #[arg(long, allow_hyphen_values = true)]
    pub start: String,

    /// Window end, same formats as --start
    #[arg(long, default_value = "now", allow_hyphen_values = true)]
    pub end: String,

    /// Filter expression
    #[arg(long)]
    pub query: Option<String>,

    #[arg(long)]
    pub page_size: Option<u32>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub alarm_mode: Option<u8>,

    /// Field filter, may be repeated
    #[arg(long = "filter")]
    pub filters: Vec<String>,

    /// Skip window width checks
    #[arg(long)]
    pub unbounded: bool,
}

impl QueryArgs {
    pub fn to_request(&self) -> Result<QueryRequest> {
        let start = parse_timestamp(&self.start).context("invalid --start")?;
        let end = parse_timestamp(&self.end).context("invalid --end")?;

        let mut request = QueryRequest::new(self.table, start, end)
            .with_extras(QueryExtras {
                page_size: self.page_size,
                page: self.page,
                alarm_mode: self.alarm_mode,
                filters: self.filters.clone(),
            })
            .with_unbounded_window(self.unbounded);
        if let Some(query) = &self.query {
            request = request.with_query(query.clone());
        }

        Ok(request)
    }
}

/// Run one admitted query against the configured backend and print the
/// result as JSON.
///
/// Ctrl-C cancels the in-flight request. A rejected query exits with
/// [`REJECTED_EXIT_CODE`].
pub fn run_query(operation: Operation, args: QueryArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(query(operation, args))
}

async fn query(operation: Operation, args: QueryArgs) -> Result<()> {
    let cfg = load_config(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    let request = args.to_request()?;

    let backend = HttpBackend::new(&cfg.config.backend).context("failed to build http client")?;
    let dispatcher = QueryDispatcher::new(
        AdmissionGuard::new(Arc::new(cfg.config.policy)),
        Arc::new(backend),
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling query");
            on_interrupt.cancel();
        }
    });

    let output = match operation {
        Operation::Search => dispatcher
            .search(&request, &cancel)
            .await
            .and_then(|res| serde_json::to_string_pretty(&res).map_err(DispatchError::from)),
        Operation::Histogram => dispatcher
            .histogram(&request, &cancel)
            .await
            .and_then(|res| serde_json::to_string_pretty(&res).map_err(DispatchError::from)),
    };

    match output {
        Ok(json) => {
            println!("{json}");
            Ok(())
        }
        Err(DispatchError::Rejected(rejection)) => {
            eprintln!("{}", rejection.message);
            std::process::exit(REJECTED_EXIT_CODE);
        }
        Err(err) => Err(err).with_context(|| format!("{operation} failed")),
    }
}

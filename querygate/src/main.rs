use clap::{Parser, Subcommand};
use querygate_core::admission::Operation;
use querygate_core::cli;
use querygate_core::logging::init_logging;

#[derive(Parser, Debug)]
#[command(
    name = "querygate",
    version,
    about = "querygate: time-window admission for log search queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },

    /// Evaluate a query against the admission policy without contacting the backend
    Admit(cli::admit::AdmitArgs),

    /// Run a log search through admission
    Search(cli::query::QueryArgs),

    /// Run a histogram query through admission
    Histogram(cli::query::QueryArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Config { cmd } => cli::config::run(cmd),
        Command::Admit(args) => cli::admit::admit(args),
        Command::Search(args) => cli::query::run_query(Operation::Search, args),
        Command::Histogram(args) => cli::query::run_query(Operation::Histogram, args),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Print diagnostics without colors or graphics
        #[arg(short, long, default_value = "false")]
        plain: bool,

        /// Print the validation report as JSON
        #[arg(long, conflicts_with = "plain")]
        json: bool,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = "config")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,

        /// Which representation to print: spec or runtime
        #[arg(long, default_value = "runtime")]
        repr: RepresentationFormat,
    },

    /// Initialize a new config directory
    Init {
        /// Path to config directory
        #[arg(default_value = "config")]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path, plain, json } => check(path, plain, json),
        ConfigCmd::Dump {
            path,
            json,
            yaml,
            repr,
        } => dump(path, json, yaml, repr),
        ConfigCmd::Init { path } => init(path),
    }
}

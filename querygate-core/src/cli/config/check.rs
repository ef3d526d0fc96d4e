use crate::admission::{Operation, OperationPolicy};
use crate::conf::{ConfigError, ValidationReport, load_config};
use miette::Report;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool, json: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            if json {
                cfg.validation.render_json()?;
                return Ok(());
            }

            println!("✔ Config loaded successfully");
            println!("✔ backend {}", cfg.config.backend.base_url);
            for operation in Operation::ALL {
                println!("✔ {}", describe_row(cfg.config.policy.row(operation)));
            }
            match cfg.config.policy.bypass_token() {
                Some(token) => println!("✔ legacy bypass token '{token}' honoured"),
                None => println!("✔ legacy bypass token disabled"),
            }

            if cfg.validation.has_violations() {
                println!();
                render_report(&cfg.validation, plain);
            }
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain, json);
            std::process::exit(1);
        }
    }
}

fn describe_row(row: &OperationPolicy) -> String {
    if !row.enabled {
        return format!("{} policy disabled", row.operation);
    }
    format!(
        "{} policy: {} pattern rule(s), default window {}s",
        row.operation,
        row.patterns.len(),
        row.default_rule.max_width_seconds
    )
}

fn render_report(report: &ValidationReport, plain: bool) {
    if plain {
        report.render_plain();
    } else {
        report.render_pretty();
    }
}

fn print_config_error(err: ConfigError, plain: bool, json: bool) {
    // Validation failures carry their own report
    if let ConfigError::Validation { report } = &err {
        if json {
            if let Err(e) = report.render_json() {
                eprintln!("failed to render report: {e}");
            }
        } else {
            render_report(report, plain);
        }
        return;
    }

    let hint = config_error_hint(&err);
    if plain || json {
        eprintln!("{}", err);
    } else {
        eprintln!();
        eprintln!("{:?}", Report::new(err));
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // IO / discovery
        //---------------------------------------------------------------------
        ConfigError::ReadFile { .. } => Some(
            "The config directory must contain a querygate.hcl entrypoint.\n\
             \n\
             Create one with:\n\
             \n\
             querygate config init",
        ),

        ConfigError::Glob { .. } => Some(
            "Include patterns are globs relative to the config directory.\n\
             \n\
             Example:\n\
             \n\
             include = {\n  policies = \"policies/*.hcl\"\n}",
        ),

        //---------------------------------------------------------------------
        // Parsing
        //---------------------------------------------------------------------
        ConfigError::Parse { .. } => Some(
            "Check the file for HCL syntax errors and unknown fields.\n\
             \n\
             Policy files may only define `search_policy` and `histogram_policy`.",
        ),

        //---------------------------------------------------------------------
        // Lowering
        //---------------------------------------------------------------------
        ConfigError::InvalidBackendUrl { .. } => Some(
            "The backend base url must be absolute.\n\
             \n\
             Example:\n\
             \n\
             backend = {\n  base_url = \"https://logs.example.com/api-prefix/\"\n}",
        ),

        ConfigError::InvalidWindowLimit { .. } => Some(
            "Window limits set exactly one unit.\n\
             \n\
             Example:\n\
             \n\
             default_limit = { days = 15 }",
        ),

        ConfigError::DuplicatePolicy { .. } => Some(
            "Each operation may be configured once across all policy files.\n\
             \n\
             Remove or merge the duplicate block.",
        ),

        ConfigError::Validation { .. } => None,
    }
}

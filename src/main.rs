//! Tallybook main entry point

mod args;
mod cli;
mod input;

use std::process::ExitCode;
use tallybook_config::ConfigError;
use tallybook_core::CoreError;

fn main() -> ExitCode {
    let args = args::parse();

    match cli::main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("{:?}", error);
            let (severity, hints) = diagnose(&error);
            eprintln!("{}: {:#}", severity, error);
            for hint in hints {
                eprintln!("  hint: {}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

/// Severity label and suggestions for errors raised by the library crates
fn diagnose(error: &anyhow::Error) -> (String, Vec<String>) {
    if let Some(core_error) = error.downcast_ref::<CoreError>() {
        return (core_error.severity().to_string(), core_error.to_details().suggestions);
    }
    if let Some(config_error) = error.downcast_ref::<ConfigError>() {
        let details = config_error.to_details();
        let mut hints = details.suggestions;
        if let Some(field) = details.field {
            hints.insert(0, format!("Check `{}` in the configuration file.", field));
        }
        return (config_error.severity().to_string(), hints);
    }
    ("error".to_string(), Vec::new())
}

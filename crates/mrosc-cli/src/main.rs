//! Entry point for the `mrosc` binary.

use std::process::ExitCode;

use clap::Parser;
use mrosc_common_config::Environment;
use mrosc_cli::error::Exit;
use mrosc_cli::{Cli, CliError, OutputFormat};

fn main() -> ExitCode {
    // .env files feed env-backed flags, so load them before parsing
    let env = Environment::init();
    let cli = Cli::parse();

    let config = cli.load_config();
    if let Err(e) = mrosc_common_log::init(cli.log_config(config.as_ref().ok())) {
        eprintln!("warning: {e}");
    }
    if let Err(e) = env {
        tracing::warn!("{e}");
    }

    let format = cli.format;
    match config.and_then(|config| cli.execute(config)) {
        Ok(()) => Exit::Success.into(),
        Err(e) => {
            report(&e, format);
            e.exit_code()
        }
    }
}

fn report(error: &CliError, format: OutputFormat) {
    tracing::debug!(code = error.code(), "command failed: {error:?}");
    match format {
        OutputFormat::Text => eprintln!("{}", error.render_text()),
        OutputFormat::Json => println!("{}", error.render_json()),
    }
}

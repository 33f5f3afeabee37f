mod cmd;
mod config;
mod exit;
mod logging;

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Command;
use crate::config::Config;
use crate::exit::{CliError, USAGE};
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "orblink", version, about = "Sphero-style robot CLI")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "FILE", default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let result = Config::load(&cli.config)
        .map_err(|err| CliError::new(USAGE, err.to_string()))
        .and_then(|config| cmd::run(cli.command, &config));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

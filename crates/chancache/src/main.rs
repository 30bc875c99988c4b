mod capture;
mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::{Command, Context};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "chancache",
    version,
    about = "Inspect and replay cached expansion channel configuration"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Cache configuration file (JSON).
    #[arg(long, value_name = "FILE", global = true, env = "CHANCACHE_CONFIG")]
    config: Option<PathBuf>,

    /// Number of analog channels (overrides the config file).
    #[arg(long, value_name = "N", global = true)]
    analog_channels: Option<usize>,

    /// Number of PWM channels (overrides the config file).
    #[arg(long, value_name = "N", global = true)]
    pwm_channels: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::load_config(cli.config.as_deref(), cli.analog_channels, cli.pwm_channels)
        .and_then(|config| cmd::run(cli.command, &Context { format, config }));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

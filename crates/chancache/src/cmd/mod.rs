use std::path::{Path, PathBuf};

use chancache_core::CacheConfig;
use clap::{Args, Subcommand};

use crate::exit::{cache_error, io_error, CliResult};
use crate::output::OutputFormat;

pub mod inspect;
pub mod replay;
pub mod snapshot;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every analog channel from a capture.
    Inspect(InspectArgs),
    /// Print the restore sequence for a capture.
    Replay(ReplayArgs),
    /// Write the compacted cache snapshot for a capture.
    Snapshot(SnapshotArgs),
    /// Show version information.
    Version(VersionArgs),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub format: OutputFormat,
    pub config: CacheConfig,
}

pub fn run(command: Command, ctx: &Context) -> CliResult<i32> {
    match command {
        Command::Inspect(args) => inspect::run(args, ctx),
        Command::Replay(args) => replay::run(args, ctx),
        Command::Snapshot(args) => snapshot::run(args, ctx),
        Command::Version(args) => version::run(args, ctx),
    }
}

/// Resolve the cache configuration: file (if any), then flag overrides.
pub fn load_config(
    path: Option<&Path>,
    analog_channels: Option<usize>,
    pwm_channels: Option<usize>,
) -> CliResult<CacheConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
            CacheConfig::from_json(&text)
                .map_err(|err| cache_error(&format!("invalid config {}", path.display()), err))?
        }
        None => CacheConfig::default(),
    };

    if let Some(analog) = analog_channels {
        config.layout.analog_channels = analog;
    }
    if let Some(pwm) = pwm_channels {
        config.layout.pwm_channels = pwm;
    }
    config
        .validate()
        .map_err(|err| cache_error("invalid configuration", err))?;
    Ok(config)
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Capture file (JSON Lines of {"slot", "payload"}).
    pub capture: PathBuf,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Capture file (JSON Lines of {"slot", "payload"}).
    pub capture: PathBuf,
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Capture file (JSON Lines of {"slot", "payload"}).
    pub capture: PathBuf,
    /// Write the snapshot here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[cfg(test)]
mod tests {
    use chancache_core::SlotLayout;

    use super::*;
    use crate::exit::USAGE;

    #[test]
    fn flags_override_defaults() {
        let config = load_config(None, Some(4), Some(0)).unwrap();
        assert_eq!(config.layout, SlotLayout::new(4, 0));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, r#"{"layout":{"analog_channels":2,"pwm_channels":1}}"#).unwrap();

        let config = load_config(Some(path.as_path()), None, Some(3)).unwrap();
        assert_eq!(config.layout, SlotLayout::new(2, 3));
    }

    #[test]
    fn invalid_geometry_is_usage_error() {
        let err = load_config(None, Some(0), None).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}

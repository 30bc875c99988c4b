use std::fs;

use tracing::info;

use crate::capture::{read_capture, replay_capture};
use crate::cmd::{Context, SnapshotArgs};
use crate::exit::{io_error, json_error, CliResult, SUCCESS};

pub fn run(args: SnapshotArgs, ctx: &Context) -> CliResult<i32> {
    let messages = read_capture(&args.capture)?;
    let replayed = replay_capture(&messages, ctx.config)?;

    let snapshot = replayed.cache.snapshot();
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|err| json_error("failed encoding snapshot", err))?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
            info!(
                path = %path.display(),
                entries = snapshot.entries.len(),
                "snapshot written"
            );
        }
        None => println!("{json}"),
    }
    Ok(SUCCESS)
}

use tracing::info;

use crate::capture::{read_capture, replay_capture};
use crate::cmd::{Context, InspectArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::print_channel_report;

pub fn run(args: InspectArgs, ctx: &Context) -> CliResult<i32> {
    let messages = read_capture(&args.capture)?;
    let replayed = replay_capture(&messages, ctx.config)?;
    info!(
        capture = %args.capture.display(),
        applied = replayed.applied,
        rejected = replayed.rejected,
        "capture loaded"
    );

    print_channel_report(
        &replayed.cache,
        replayed.applied,
        replayed.rejected,
        ctx.format,
    );
    Ok(SUCCESS)
}

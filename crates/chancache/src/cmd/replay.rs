use crate::capture::{read_capture, replay_capture};
use crate::cmd::{Context, ReplayArgs};
use crate::exit::{CliResult, SUCCESS};
use crate::output::print_restore_plan;

pub fn run(args: ReplayArgs, ctx: &Context) -> CliResult<i32> {
    let messages = read_capture(&args.capture)?;
    let replayed = replay_capture(&messages, ctx.config)?;

    let plan = replayed.cache.restore_all();
    print_restore_plan(&plan, ctx.format);
    Ok(SUCCESS)
}

use crate::cmd::{Context, VersionArgs};
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs, ctx: &Context) -> CliResult<i32> {
    if !args.extended {
        println!("chancache {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    let layout = ctx.config.layout;
    println!("name: chancache");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("CHANCACHE_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "layout: analog={} pwm={} slots={}",
        layout.analog_channels,
        layout.pwm_channels,
        layout.slot_count()
    );
    println!("max_message_len: {}", ctx.config.max_message_len);

    Ok(SUCCESS)
}

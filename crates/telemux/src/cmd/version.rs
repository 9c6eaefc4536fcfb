use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("telemux {}", env!("CARGO_PKG_VERSION"));
    if args.extended {
        println!("edition: 2021");
        println!(
            "wire protocol: channel_id u32-le + length u16-le, record format version 0x01"
        );
    }
    Ok(SUCCESS)
}

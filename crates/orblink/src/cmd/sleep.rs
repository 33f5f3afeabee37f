use std::sync::mpsc;

use orblink_device::ResponseExt;

use crate::cmd::{await_reply, open_driver, parse_duration, SleepArgs};
use crate::config::Config;
use crate::exit::{command_error, conn_error, CliResult, SUCCESS};

pub fn run(args: SleepArgs, config: &Config) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let (mut driver, _events) = open_driver(config)?;
    let (reply_tx, reply_rx) = mpsc::channel();

    driver
        .sleep(args.wakeup, 0, 0, Some(&reply_tx))
        .map_err(|err| conn_error("sleep failed", err))?;
    let answer = await_reply(&reply_rx, timeout)?;
    answer
        .status()
        .map_err(|err| command_error("sleep rejected", err))?;

    if args.wakeup == 0 {
        println!("sleeping");
    } else {
        println!("sleeping, waking in {}s", args.wakeup);
    }
    driver.close();
    Ok(SUCCESS)
}

use std::sync::mpsc;
use std::time::Instant;

use orblink_device::ResponseExt;

use crate::cmd::{await_reply, open_driver, parse_duration, PingArgs};
use crate::config::Config;
use crate::exit::{command_error, conn_error, CliResult, SUCCESS};

pub fn run(args: PingArgs, config: &Config) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let (mut driver, _events) = open_driver(config)?;
    let (reply_tx, reply_rx) = mpsc::channel();

    for _ in 0..args.count {
        let started = Instant::now();
        let seq = driver
            .ping(Some(&reply_tx))
            .map_err(|err| conn_error("ping failed", err))?;
        let answer = await_reply(&reply_rx, timeout)?;
        answer
            .status()
            .map_err(|err| command_error("ping rejected", err))?;
        println!("PONG seq={seq} time={:?}", started.elapsed());
    }

    driver.close();
    Ok(SUCCESS)
}

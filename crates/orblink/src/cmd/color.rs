use std::sync::mpsc;

use orblink_device::ResponseExt;

use crate::cmd::{await_reply, open_driver, parse_duration, GetColorArgs, SetColorArgs};
use crate::config::Config;
use crate::exit::{command_error, conn_error, decode_error, CliResult, SUCCESS};

pub fn set(args: SetColorArgs, config: &Config) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let (mut driver, _events) = open_driver(config)?;
    let (reply_tx, reply_rx) = mpsc::channel();

    driver
        .set_rgb_led(args.red, args.green, args.blue, Some(&reply_tx))
        .map_err(|err| conn_error("set-color failed", err))?;
    let answer = await_reply(&reply_rx, timeout)?;
    answer
        .status()
        .map_err(|err| command_error("set-color rejected", err))?;

    println!("color set to {} {} {}", args.red, args.green, args.blue);
    driver.close();
    Ok(SUCCESS)
}

pub fn get(args: GetColorArgs, config: &Config) -> CliResult<i32> {
    let timeout = parse_duration(&args.timeout)?;
    let (mut driver, _events) = open_driver(config)?;
    let (reply_tx, reply_rx) = mpsc::channel();

    driver
        .get_rgb_led(Some(&reply_tx))
        .map_err(|err| conn_error("get-color failed", err))?;
    let answer = await_reply(&reply_rx, timeout)?;
    answer
        .status()
        .map_err(|err| command_error("get-color rejected", err))?;
    let color = answer
        .color()
        .map_err(|err| decode_error("get-color answer", err))?;

    println!("color is {} {} {}", color.r, color.g, color.b);
    driver.close();
    Ok(SUCCESS)
}
